//! Shell state, dispatch and error reporting.

use std::{io, sync::Arc};

use assist_config::{Config, ConfigManager};
use assist_core::Localizer;
use assist_storage_json::JsonSlotStorage;
use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;
use tokio::runtime::Handle;

use crate::{
    errors::{CliError, SessionError, SubmitError, SuggestionError},
    i18n::Catalog,
    session::{ApplicationSession, RestoreChoice, StartupState},
    submission::{MockSubmitter, Submitter},
    suggestion::{OfflineProvider, SuggestionProvider},
};

use super::commands::{self, CommandRegistry};
use super::io as cli_io;
use super::output::{self, OutputPreferences};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Submit(#[from] SubmitError),
    #[error(transparent)]
    Suggestion(#[from] SuggestionError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Session(inner) => CliError::Session(inner),
            other => CliError::Command(other.to_string()),
        }
    }
}

pub struct ShellContext {
    pub(crate) mode: CliMode,
    pub(crate) registry: CommandRegistry,
    pub(crate) session: ApplicationSession,
    pub(crate) config: Config,
    pub(crate) theme: ColorfulTheme,
    pub(crate) last_command: Option<String>,
    pub(crate) running: bool,
    runtime: Handle,
    config_manager: ConfigManager,
    submitter: Arc<dyn Submitter>,
    provider: Arc<dyn SuggestionProvider>,
}

impl ShellContext {
    /// Loads config from the application home and opens the autosave slots.
    pub fn new(mode: CliMode, runtime: Handle) -> Result<Self, CliError> {
        let home = Config::home_dir();
        let config_manager = ConfigManager::with_base_dir(home.clone())?;
        let config = config_manager.load()?;
        let storage = JsonSlotStorage::new(config.resolve_storage_dir(&home))?;
        let submitter = Arc::new(MockSubmitter::new(config.submission.simulated_latency()));
        let session = ApplicationSession::new(Arc::new(storage), &config);

        let context = ShellContext {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            session,
            config,
            theme: ColorfulTheme::default(),
            last_command: None,
            running: true,
            runtime,
            config_manager,
            submitter,
            provider: Arc::new(OfflineProvider),
        };
        context.apply_output_preferences();
        Ok(context)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn catalog(&self) -> Catalog {
        self.session.catalog()
    }

    pub(crate) fn text(&self, key: &str) -> String {
        self.catalog().get(key)
    }

    pub(crate) fn format(&self, key: &str, params: &[(&str, &str)]) -> String {
        self.catalog().format(key, params)
    }

    pub(crate) fn prompt(&self) -> String {
        let step = self.session.current_step();
        if self.session.is_submitted() {
            "assist [submitted]> ".to_string()
        } else {
            format!("assist [{}/{}]> ", step, assist_domain::StepIndex::COUNT)
        }
    }

    /// Handle used to drive async session calls from the shell loop.
    pub(crate) fn runtime_handle(&self) -> Handle {
        self.runtime.clone()
    }

    pub(crate) fn submitter(&self) -> Arc<dyn Submitter> {
        Arc::clone(&self.submitter)
    }

    pub(crate) fn provider(&self) -> Arc<dyn SuggestionProvider> {
        Arc::clone(&self.provider)
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager
            .save(&self.config)
            .map_err(|err| CommandError::Session(err.into()))
    }

    pub(crate) fn apply_output_preferences(&self) {
        output::set_preferences(OutputPreferences {
            plain: self.mode == CliMode::Script,
            right_to_left: self.session.locale().is_right_to_left(),
        });
    }

    /// Runs the restore/discard decision. Interactive shells ask right away;
    /// scripts are told to answer with `restore` or `discard`.
    pub(crate) fn startup(&mut self) -> Result<(), CliError> {
        let StartupState::RestoreOffered { saved_at, step } = self.session.start() else {
            return Ok(());
        };
        let saved_at = saved_at
            .map(|stamp| stamp.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "-".to_string());
        cli_io::print_info(self.format(
            "shell.restoreOffered",
            &[("savedAt", &saved_at), ("step", &step.to_string())],
        ));

        match self.mode {
            CliMode::Interactive => {
                let question = self.text("shell.restoreQuestion");
                let restore = cli_io::confirm_action(&self.theme, &question, true)?;
                let choice = if restore {
                    RestoreChoice::Restore
                } else {
                    RestoreChoice::Discard
                };
                commands::apply_restore_choice(self, choice)?;
            }
            CliMode::Script => cli_io::print_hint(self.text("shell.restoreHint")),
        }
        Ok(())
    }

    /// Writes any pending auto-save before the shell goes away.
    pub(crate) fn shutdown(&mut self) {
        if self.session.flush() {
            tracing::debug!("flushed pending auto-save on exit");
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(definition) = self.registry.get(command) {
            let handler = definition.handler;
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, input), name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = best {
            if distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(&message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Submit(SubmitError::Incomplete { step }) => {
                cli_io::print_error(self.format("shell.blocked", &[("step", &step.to_string())]));
                Ok(())
            }
            CommandError::Suggestion(err) => {
                cli_io::print_error(self.text(err.message_key()));
                Ok(())
            }
            CommandError::Io(err) => Err(err.into()),
            other => {
                cli_io::print_error(other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        cli_io::confirm_action(&self.theme, "Exit the application?", false).map_err(CliError::from)
    }
}
