//! Subcommand handlers. Each one talks to the in-process `App`
//! (SPEC_FULL §0) and prints its DTO response as pretty JSON, the same
//! shape a future HTTP router would serialize over the wire (§6).

pub mod generate;
pub mod health;
pub mod pipeline;
pub mod simulate;

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
