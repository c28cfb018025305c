//! The `renditor methods` command: list the batch tool's resize filters.

use renditor_core::ResizeMethod;

/// Execute the methods command.
pub fn execute() -> anyhow::Result<()> {
    println!("Available resize methods (use the index or the name):\n");
    for method in ResizeMethod::ALL {
        println!("  {:>2}  {}", method.index(), method.name());
    }
    Ok(())
}
