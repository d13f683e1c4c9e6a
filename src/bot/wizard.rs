use std::sync::Arc;

use cyberquiz::autocomplete::{Key, SHOW_ALL_LABEL};
use cyberquiz::generator::{Generator, ParamValue};
use cyberquiz::page::{FieldDomain, FieldSpec};
use cyberquiz::Session;
use teloxide::{prelude::*, types::KeyboardRemove};

use super::keyboards::{
    choice_keyboard, suggestion_keyboard, KEY_DOWN, KEY_ENTER, KEY_ESCAPE, KEY_UP,
};
use super::{quiz, HandlerError, HandlerResult, QuizDialogue, State};

fn current_value(session: &Session, field: &FieldSpec) -> String {
    session
        .params()
        .get(field.name)
        .map(ToString::to_string)
        .unwrap_or_default()
}

pub async fn prompt_step(bot: &Bot, chat: ChatId, session: &Session, step: usize) -> HandlerResult {
    let Some(field) = session.page().fields.get(step) else {
        return Ok(());
    };
    match field.domain {
        FieldDomain::Choice(choices) => {
            bot.send_message(
                chat,
                format!("{}? (currently {})", field.label, current_value(session, field)),
            )
            .reply_markup(choice_keyboard(choices))
            .await?;
        }
        FieldDomain::FreeText { suggestions: Some(_) } => {
            bot.send_message(
                chat,
                format!(
                    "{}: type part of a name (e.g. \"phish\") for suggestions, or enter your own.",
                    field.label
                ),
            )
            .reply_markup(KeyboardRemove::new())
            .await?;
        }
        FieldDomain::FreeText { suggestions: None } => {
            bot.send_message(chat, format!("{}?", field.label))
                .reply_markup(KeyboardRemove::new())
                .await?;
        }
        FieldDomain::Range { min, max } => {
            let quarters: Vec<String> = (1..=4).map(|q| (min + (max - min) * q / 4).to_string()).collect();
            let quarters: Vec<&str> = quarters.iter().map(String::as_str).collect();
            bot.send_message(
                chat,
                format!(
                    "{} from {} to {}? (currently {})",
                    field.label,
                    min,
                    max,
                    current_value(session, field)
                ),
            )
            .reply_markup(choice_keyboard(&quarters))
            .await?;
        }
    }
    Ok(())
}

pub async fn configure(
    bot: Bot,
    dialogue: QuizDialogue,
    generator: Arc<dyn Generator>,
    (mut session, step): (Session, usize),
    msg: Message,
) -> HandlerResult {
    let Some(text) = msg.text() else {
        bot.send_message(msg.chat.id, "Please answer with text.").await?;
        return Ok(());
    };
    let Some(field) = session.page().fields.get(step) else {
        return quiz::start_generation(bot, dialogue, generator, session, msg.chat.id).await;
    };

    let accepted = match field.domain {
        FieldDomain::Choice(_) => {
            set_or_explain(&bot, msg.chat.id, &mut session, field, ParamValue::Text(text.to_string()))
                .await?
        }
        FieldDomain::Range { .. } => match text.trim().parse::<i64>() {
            Ok(n) => set_or_explain(&bot, msg.chat.id, &mut session, field, ParamValue::Int(n)).await?,
            Err(_) => {
                bot.send_message(msg.chat.id, "Please enter a whole number.").await?;
                false
            }
        },
        FieldDomain::FreeText { suggestions: None } => {
            session.type_text(field.name, text)?;
            true
        }
        FieldDomain::FreeText { suggestions: Some(_) } => {
            suggest(&bot, msg.chat.id, &mut session, field, text).await?
        }
    };

    if !accepted {
        dialogue.update(State::Configure { session, step }).await?;
        return Ok(());
    }

    let next = step + 1;
    if next < session.page().fields.len() {
        prompt_step(&bot, msg.chat.id, &session, next).await?;
        dialogue.update(State::Configure { session, step: next }).await?;
        return Ok(());
    }
    quiz::start_generation(bot, dialogue, generator, session, msg.chat.id).await
}

async fn set_or_explain(
    bot: &Bot,
    chat: ChatId,
    session: &mut Session,
    field: &FieldSpec,
    value: ParamValue,
) -> Result<bool, HandlerError> {
    match session.set_field(field.name, value) {
        Ok(()) => Ok(true),
        Err(e) => {
            bot.send_message(chat, e.to_string()).await?;
            Ok(false)
        }
    }
}

/// One message in a suggestion-backed field. Returns whether the field is settled.
async fn suggest(
    bot: &Bot,
    chat: ChatId,
    session: &mut Session,
    field: &FieldSpec,
    text: &str,
) -> Result<bool, HandlerError> {
    let name = field.name;
    let open = session.suggestions(name).map_or(false, |ac| ac.is_open());

    if open {
        match text {
            SHOW_ALL_LABEL => session.show_all_suggestions(name),
            KEY_UP => {
                session.suggestion_key(name, Key::Up);
            }
            KEY_DOWN => {
                session.suggestion_key(name, Key::Down);
            }
            KEY_ENTER => match session.suggestion_key(name, Key::Enter) {
                Some(chosen) => {
                    bot.send_message(chat, format!("{}: {}", field.label, chosen)).await?;
                    return Ok(true);
                }
                None => {
                    bot.send_message(chat, format!("Nothing is highlighted yet, use {} first.", KEY_DOWN))
                        .await?;
                }
            },
            KEY_ESCAPE => {
                session.suggestion_key(name, Key::Escape);
                bot.send_message(chat, format!("{}: {}", field.label, current_value(session, field)))
                    .await?;
                return Ok(true);
            }
            other => match session.click_suggestion(name, other) {
                Some(chosen) => {
                    bot.send_message(chat, format!("{}: {}", field.label, chosen)).await?;
                    return Ok(true);
                }
                None => session.type_text(name, other)?,
            },
        }
    } else {
        session.type_text(name, text)?;
    }

    let Some(ac) = session.suggestions(name) else {
        return Ok(true);
    };
    if !ac.is_open() {
        bot.send_message(
            chat,
            format!("No suggestions for {:?}, using it as typed.", ac.value()),
        )
        .await?;
        return Ok(true);
    }

    let mut panel = format!("Suggestions for {:?}:", ac.value());
    for (i, s) in ac.visible().iter().enumerate() {
        let marker = if ac.active() == Some(i) { "▶" } else { "•" };
        panel.push_str(&format!("\n{} {}", marker, s));
    }
    if ac.can_show_all() {
        panel.push_str(&format!("\n…and {} more", ac.match_count() - ac.visible().len()));
    }
    bot.send_message(chat, panel)
        .reply_markup(suggestion_keyboard(ac))
        .await?;
    Ok(false)
}
