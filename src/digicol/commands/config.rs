use crate::commands::{CmdMessage, CmdResult, CollectionPaths};
use crate::config::CollectionConfig;
use crate::error::Result;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

/// Show or change the config of the data directory. Unknown keys and bad values come
/// back as error messages; the file is only written after a successful change.
pub fn run(paths: &CollectionPaths, action: ConfigAction) -> Result<CmdResult> {
    let dir = &paths.data_dir;
    let mut config = CollectionConfig::load(dir)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => return Ok(result.with_config(config)),
        ConfigAction::ShowKey(key) => match config.get(&key) {
            Ok(value) => result.add_message(CmdMessage::info(format!("{} = {}", key, value))),
            Err(e) => result.add_message(CmdMessage::error(e.to_string())),
        },
        ConfigAction::Set(key, value) => match config.set(&key, &value) {
            Ok(()) => {
                config.save(dir)?;
                tracing::debug!(%key, %value, "config updated");
                let shown = config.get(&key)?;
                result.add_message(CmdMessage::success(format!("{} set to {}", key, shown)));
                result = result.with_config(config);
            }
            Err(e) => result.add_message(CmdMessage::error(e.to_string())),
        },
    }

    Ok(result)
}
