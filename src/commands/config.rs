use serde_json::json;

use crate::config::Config;
use crate::error::Result;

pub fn cmd_config_show(output_json: bool) -> Result<()> {
    let config = Config::load()?;

    if output_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "data_path": config.data_path().display().to_string(),
                "clipboard": { "enabled": config.clipboard_enabled() },
            }))?
        );
        return Ok(());
    }

    println!("data_path = {}", config.data_path().display());
    println!("clipboard.enabled = {}", config.clipboard_enabled());
    Ok(())
}

pub fn cmd_config_get(key: &str) -> Result<()> {
    let config = Config::load()?;
    println!("{}", config.get(key)?);
    Ok(())
}

pub fn cmd_config_set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;
    println!("Set {} = {}", key, value);
    Ok(())
}
