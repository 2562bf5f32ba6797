use crate::cli::ConfigCommand;
use crate::config::{self, CliOverrides};
use crate::error::Result;

/// Execute the config command.
///
/// # Errors
///
/// Returns an error if the workspace is missing or preferences cannot
/// be written.
pub fn execute(command: &ConfigCommand, json: bool, cli: &CliOverrides) -> Result<()> {
    let workspace = config::discover_workspace(None, cli)?;
    let mut prefs = config::load_prefs(&workspace);

    match command {
        ConfigCommand::Show => {
            if json {
                println!("{}", serde_json::to_string_pretty(&prefs)?);
            } else {
                let lang = prefs
                    .language
                    .map_or("(system)", crate::i18n::Language::as_str);
                println!("language: {lang}");
                println!("viewMode: {}", prefs.view_mode.as_str());
            }
        }
        ConfigCommand::SetLang { lang } => {
            prefs.language = Some(*lang);
            config::save_prefs(&workspace, &prefs)?;
            println!("language = {}", lang.as_str());
        }
        ConfigCommand::SetView { view } => {
            prefs.view_mode = *view;
            config::save_prefs(&workspace, &prefs)?;
            println!("viewMode = {}", view.as_str());
        }
    }
    Ok(())
}
