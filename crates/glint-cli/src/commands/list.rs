//! Effect catalogue listing

use anyhow::Result;
use glint_fx::{EffectKind, TriggerPolicy};

pub fn run() -> Result<()> {
    println!("Effects:");
    for kind in EffectKind::ALL {
        let burst = if kind.supports_burst() { " [burst]" } else { "" };
        println!("  {:<11} {}{}", kind.name(), kind.description(), burst);
    }

    let triggers: Vec<&str> = TriggerPolicy::ALL.iter().map(|t| t.label()).collect();
    println!();
    println!("Triggers: {}", triggers.join(", "));
    Ok(())
}
