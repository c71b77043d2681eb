//! Shell commands. Each handler receives the shell context and the
//! whitespace-split arguments that followed the command name.

use std::collections::HashMap;

use assist_domain::{FieldName, Locale, StepIndex};
use strsim::levenshtein;

use crate::{
    navigation::NavOutcome,
    session::{FieldUpdate, RestoreChoice},
    suggestion::SuggestionPhase,
};

use super::context::{CommandError, CommandResult, ShellContext};
use super::io;
use super::output;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandDefinition {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandDefinition>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new(definitions: Vec<CommandDefinition>) -> Self {
        let mut commands = HashMap::new();
        let mut order = Vec::new();
        for definition in definitions {
            order.push(definition.name);
            commands.insert(definition.name, definition);
        }
        Self { commands, order }
    }

    pub fn get(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.order
            .iter()
            .filter_map(move |name| self.commands.get(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }
}

pub(crate) fn all_definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("status", "Show progress through the form", "status", cmd_status),
        CommandDefinition::new(
            "show",
            "List the fields of a step with their values and errors",
            "show [step]",
            cmd_show,
        ),
        CommandDefinition::new(
            "set",
            "Set a field value",
            "set <field> <value...>",
            cmd_set,
        ),
        CommandDefinition::new("next", "Validate this step and move on", "next", cmd_next),
        CommandDefinition::new("back", "Go back one step", "back", cmd_back),
        CommandDefinition::new(
            "restore",
            "Continue the saved application",
            "restore",
            cmd_restore,
        ),
        CommandDefinition::new(
            "discard",
            "Throw away the saved application and start fresh",
            "discard",
            cmd_discard,
        ),
        CommandDefinition::new(
            "suggest",
            "Ask for a writing suggestion for a description field",
            "suggest <field>",
            cmd_suggest,
        ),
        CommandDefinition::new(
            "accept",
            "Use the current suggestion, optionally edited",
            "accept [text...]",
            cmd_accept,
        ),
        CommandDefinition::new("reject", "Dismiss the current suggestion", "reject", cmd_reject),
        CommandDefinition::new("submit", "Submit the completed application", "submit", cmd_submit),
        CommandDefinition::new(
            "another",
            "Start a new application after submitting",
            "another",
            cmd_another,
        ),
        CommandDefinition::new("locale", "Switch language", "locale <en|ar>", cmd_locale),
        CommandDefinition::new("help", "Show available commands", "help [command]", cmd_help),
        CommandDefinition::new("exit", "Save and leave the shell", "exit", cmd_exit),
    ]
}

pub(crate) fn apply_restore_choice(
    context: &mut ShellContext,
    choice: RestoreChoice,
) -> CommandResult {
    let step = context.session.resolve_restore(choice)?;
    match choice {
        RestoreChoice::Restore => io::print_success(
            context.format("shell.restored", &[("step", &step.to_string())]),
        ),
        RestoreChoice::Discard => io::print_success(context.text("shell.discarded")),
    }
    Ok(())
}

fn parse_field(raw: &str) -> Result<FieldName, CommandError> {
    FieldName::from_key(raw).ok_or_else(|| {
        let closest = FieldName::ALL
            .iter()
            .map(|field| (levenshtein(field.key(), raw), field.key()))
            .min_by_key(|(distance, _)| *distance)
            .filter(|(distance, _)| *distance <= 3);
        match closest {
            Some((_, key)) => CommandError::InvalidArguments(format!(
                "Unknown field `{raw}`. Did you mean `{key}`?"
            )),
            None => CommandError::InvalidArguments(format!("Unknown field `{raw}`.")),
        }
    })
}

fn print_step_header(context: &ShellContext, step: StepIndex) {
    let title = context.text(&step.title_key());
    output::section(context.format(
        "shell.stepHeader",
        &[
            ("current", &step.to_string()),
            ("total", &StepIndex::COUNT.to_string()),
            ("title", &title),
        ],
    ));
}

fn print_field_update(context: &ShellContext, update: &FieldUpdate) {
    let label = context.text(&update.field.label_key());
    match &update.error {
        Some(error) => io::print_error(format!("{label}: {error}")),
        None => io::print_success(format!("{label} updated.")),
    }
    if update.step_complete {
        io::print_info(context.text("shell.stepComplete"));
    }
}

fn cmd_status(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if let Some(receipt) = context.session.receipt() {
        io::print_success(context.format(
            "shell.submitted",
            &[("reference", receipt.reference_id.as_str())],
        ));
        return Ok(());
    }

    let current = context.session.current_step();
    print_step_header(context, current);
    for step in StepIndex::all() {
        let marker = if context.session.is_step_complete(step) {
            "complete"
        } else {
            "incomplete"
        };
        let pointer = if step == current { ">" } else { " " };
        io::print_info(format!(
            "{pointer} {step}. {} ({marker})",
            context.text(&step.title_key())
        ));
    }
    if context.session.has_pending_restore() {
        io::print_hint(context.text("shell.restoreHint"));
    }
    let gateway = context.session.gateway();
    io::print_info(format!(
        "Auto-save: {}{}",
        if gateway.is_armed() { "on" } else { "off" },
        if gateway.has_pending_save() {
            " (pending)"
        } else {
            ""
        }
    ));
    Ok(())
}

fn cmd_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let step = match args.first() {
        Some(raw) => raw
            .parse::<u8>()
            .ok()
            .and_then(StepIndex::new)
            .ok_or_else(|| CommandError::InvalidArguments(format!("Unknown step `{raw}`.")))?,
        None => context.session.current_step(),
    };

    print_step_header(context, step);
    let store = context.session.store();
    for field in step.fields() {
        let value = store.get(*field);
        let shown = if value.is_empty() { "-" } else { value };
        io::print_info(format!(
            "{:<24} {}",
            format!("{} ({})", context.text(&field.label_key()), field.key()),
            shown
        ));
        if let Some(error) = store.error_for(*field) {
            io::print_error(format!("  {error}"));
        }
    }
    Ok(())
}

fn cmd_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((raw_field, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: set <field> <value...>".into(),
        ));
    };
    let field = parse_field(raw_field)?;
    let value = rest.join(" ");
    let update = context.session.set_field(field, value)?;
    print_field_update(context, &update);
    Ok(())
}

fn cmd_next(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    match context.session.next_step()? {
        NavOutcome::Moved { to, .. } => print_step_header(context, to),
        NavOutcome::Blocked { step } => {
            io::print_warning(context.format("shell.blocked", &[("step", &step.to_string())]));
            let store = context.session.store();
            for field in step.fields() {
                if let Some(error) = store.error_for(*field) {
                    io::print_error(format!("{}: {error}", context.text(&field.label_key())));
                }
            }
        }
        NavOutcome::AtBoundary { .. } => io::print_info(context.text("shell.atLast")),
    }
    Ok(())
}

fn cmd_back(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    match context.session.previous_step()? {
        NavOutcome::Moved { to, .. } => print_step_header(context, to),
        _ => io::print_info(context.text("shell.atFirst")),
    }
    Ok(())
}

fn cmd_restore(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    apply_restore_choice(context, RestoreChoice::Restore)
}

fn cmd_discard(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    apply_restore_choice(context, RestoreChoice::Discard)
}

fn cmd_suggest(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let raw = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: suggest <field>".into()))?;
    let field = parse_field(raw)?;
    let provider = context.provider();
    let runtime = context.runtime_handle();
    let state = runtime
        .block_on(context.session.request_suggestion(field, provider.as_ref()))?
        .clone();

    match state.phase() {
        SuggestionPhase::Suggested => {
            let label = context.text(&field.label_key());
            io::print_info(context.format("shell.suggestionReady", &[("field", &label)]));
            println!("{}", state.suggestion_text);
            io::print_hint(
                "Use `accept` to apply it, `accept <text>` to apply an edited version, or `reject`.",
            );
        }
        SuggestionPhase::Errored => {
            if let Some(err) = state.error {
                context.session.discard_suggestion();
                return Err(err.into());
            }
        }
        SuggestionPhase::Idle | SuggestionPhase::Loading => {}
    }
    Ok(())
}

fn cmd_accept(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let edited = (!args.is_empty()).then(|| args.join(" "));
    let update = context.session.accept_suggestion(edited)?;
    let label = context.text(&update.field.label_key());
    io::print_success(context.format("shell.suggestionAccepted", &[("field", &label)]));
    if update.step_complete {
        io::print_info(context.text("shell.stepComplete"));
    }
    Ok(())
}

fn cmd_reject(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.session.discard_suggestion();
    io::print_info(context.text("shell.suggestionDiscarded"));
    Ok(())
}

fn cmd_submit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    io::print_info(context.text("shell.submitting"));
    let submitter = context.submitter();
    let runtime = context.runtime_handle();
    let receipt = runtime.block_on(context.session.submit(submitter.as_ref()))?;

    io::print_success(context.format(
        "shell.submitted",
        &[("reference", receipt.reference_id.as_str())],
    ));
    io::print_info(context.format(
        "shell.processingTime",
        &[("time", receipt.estimated_processing_time.as_str())],
    ));
    io::print_info(receipt.message);
    Ok(())
}

fn cmd_another(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.session.reset_for_another();
    io::print_success(context.text("shell.anotherStarted"));
    print_step_header(context, context.session.current_step());
    Ok(())
}

fn cmd_locale(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let locale = match args.first() {
        Some(raw) => raw.parse::<Locale>().map_err(CommandError::InvalidArguments)?,
        None => {
            io::print_info(format!("Current language: {}", context.session.locale()));
            return Ok(());
        }
    };
    context.session.set_locale(locale);
    context.config.locale = locale.code().to_string();
    context.apply_output_preferences();
    context.persist_config()?;
    io::print_success(context.text("shell.localeChanged"));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first().map(|name| name.to_lowercase()) {
        match context.registry.get(&name) {
            Some(definition) => {
                output::section(definition.name);
                io::print_info(definition.description);
                io::print_info(format!("Usage: {}", definition.usage));
            }
            None => context.suggest_command(args[0]),
        }
        return Ok(());
    }

    output::section("Commands");
    for definition in context.registry.iter() {
        io::print_info(format!("{:<10} {}", definition.name, definition.description));
    }
    io::print_info(format!(
        "Fields: {}",
        FieldName::ALL
            .iter()
            .map(|field| field.key())
            .collect::<Vec<_>>()
            .join(", ")
    ));
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
