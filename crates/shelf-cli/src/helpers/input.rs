//! Interactive prompts.

use std::io::IsTerminal;

use dialoguer::Confirm;

/// Ask before a destructive action. `force` skips the prompt.
///
/// Without a terminal there is nobody to ask, so the action is refused
/// unless forced.
pub fn confirm(prompt: &str, force: bool) -> anyhow::Result<bool> {
    if force {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(anyhow::anyhow!(
            "Refusing to continue without confirmation; pass --force"
        ));
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read confirmation: {}", e))
}
