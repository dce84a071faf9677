//! # CLI Layer
//!
//! This module is **one possible UI client** for cardz; it is not the
//! application itself. It is the only place that:
//! - Knows about terminal I/O (stdout, stderr, key presses)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Builds `AppContext` with API and configuration
//! - `handle_*()`: Per-command handlers that call the API and print results

use super::render::{print_messages, render_card_list, render_config, render_group_list};
use super::setup::{CardCommands, Cli, Commands, GroupCommands};
use super::study;
use cardz::api::{CardzApi, CmdMessage, ConfigAction};
use cardz::config::CardzConfig;
use cardz::error::{CardzError, Result};
use cardz::init::initialize;
use cardz::logging::{init_logging, Verbosity};
use cardz::model::NewFlashcard;
use cardz::store::fs::FileStore;
use cardz::study::Ordering;
use clap::Parser;
use std::io::{self, Write};

struct AppContext {
    api: CardzApi<FileStore>,
    config: CardzConfig,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(Verbosity::from_occurrences(cli.verbose));

    let ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Group(cmd)) => match cmd {
            GroupCommands::Create { name, description } => {
                handle_group_create(&ctx, &name, description.as_deref())
            }
            GroupCommands::List => handle_group_list(&ctx),
            GroupCommands::Edit {
                group,
                name,
                description,
            } => handle_group_edit(&ctx, &group, name.as_deref(), description.as_deref()),
            GroupCommands::Delete { group, yes } => handle_group_delete(&ctx, &group, yes),
        },
        Some(Commands::Card(cmd)) => match cmd {
            CardCommands::Add {
                group,
                questions,
                answers,
            } => handle_card_add(&ctx, &group, questions, answers),
            CardCommands::List { group, search } => {
                handle_card_list(&ctx, group.as_deref(), search.as_deref())
            }
            CardCommands::Edit {
                card,
                question,
                answer,
                group,
            } => handle_card_edit(
                &ctx,
                &card,
                question.as_deref(),
                answer.as_deref(),
                group.as_deref(),
            ),
            CardCommands::Delete { card } => handle_card_delete(&ctx, &card),
        },
        Some(Commands::Study { group, no_shuffle }) => {
            handle_study(&ctx, group.as_deref(), no_shuffle)
        }
        Some(Commands::Doctor { fix }) => handle_doctor(&ctx, fix),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_group_list(&ctx),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let ctx = initialize(cli.dir.as_deref())?;
    Ok(AppContext {
        api: ctx.api,
        config: ctx.config,
    })
}

fn handle_group_create(ctx: &AppContext, name: &str, description: Option<&str>) -> Result<()> {
    let result = ctx.api.create_group(name, description)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_group_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_groups()?;
    print!(
        "{}",
        render_group_list(&result.listed_groups, ctx.config.preview_width)
    );
    print_messages(&result.messages);
    Ok(())
}

fn handle_group_edit(
    ctx: &AppContext,
    group: &str,
    name: Option<&str>,
    description: Option<&str>,
) -> Result<()> {
    let result = ctx.api.update_group(group, name, description)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_group_delete(ctx: &AppContext, group: &str, yes: bool) -> Result<()> {
    let target = ctx.api.find_group(group)?;

    if !yes {
        let cards = ctx.api.list_group_cards(&target.id)?;
        println!(
            "Deleting group \"{}\" and its {} flashcard(s).",
            target.name,
            cards.listed_cards.len()
        );
        print!("[Y] To delete: ");
        io::stdout().flush().map_err(CardzError::Io)?;

        let mut input = String::new();
        io::stdin().read_line(&mut input).map_err(CardzError::Io)?;

        if input.trim() != "Y" {
            print_messages(&[CmdMessage::info("Operation cancelled.")]);
            return Ok(());
        }
    }

    let result = ctx.api.delete_group_by_id(&target.id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_card_add(
    ctx: &AppContext,
    group: &str,
    questions: Vec<String>,
    answers: Vec<String>,
) -> Result<()> {
    if questions.len() != answers.len() {
        return Err(CardzError::Api(format!(
            "Got {} question(s) but {} answer(s); give one -a for every -q",
            questions.len(),
            answers.len()
        )));
    }
    let cards = questions
        .into_iter()
        .zip(answers)
        .map(|(q, a)| NewFlashcard::new(q, a))
        .collect();

    let result = ctx.api.add_cards(group, cards)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_card_list(ctx: &AppContext, group: Option<&str>, search: Option<&str>) -> Result<()> {
    let result = ctx.api.list_cards(group, search)?;
    print!(
        "{}",
        render_card_list(&result.listed_cards, ctx.config.preview_width)
    );
    print_messages(&result.messages);
    Ok(())
}

fn handle_card_edit(
    ctx: &AppContext,
    card: &str,
    question: Option<&str>,
    answer: Option<&str>,
    group: Option<&str>,
) -> Result<()> {
    let result = ctx.api.update_card(card, question, answer, group)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_card_delete(ctx: &AppContext, card: &str) -> Result<()> {
    let result = ctx.api.delete_card(card)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_study(ctx: &AppContext, group: Option<&str>, no_shuffle: bool) -> Result<()> {
    let ordering = if no_shuffle || !ctx.config.shuffle {
        Ordering::Stored
    } else {
        Ordering::Shuffled
    };
    study::run(&ctx.api, group, ordering)
}

fn handle_doctor(ctx: &AppContext, fix: bool) -> Result<()> {
    let result = ctx.api.doctor(fix)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = ctx.api.config(action)?;
    if let Some(config) = &result.config {
        if result.messages.is_empty() {
            print!("{}", render_config(config));
        }
    }
    print_messages(&result.messages);
    Ok(())
}
