use std::sync::Arc;

use cyberquiz::clipboard::{Clipboard, ClipboardWriteFailed};
use cyberquiz::coordinator::{Completion, Status, Ticket};
use cyberquiz::generator::{GenerationFailed, Generator};
use cyberquiz::quiz::{OptionId, Question, QuizRun};
use cyberquiz::Session;
use log::{debug, error, info};
use serde_json::Value;
use teloxide::{prelude::*, types::ChatAction};

use super::keyboards::{
    actions_keyboard, answer_keyboard, label_position, option_label, CHANGE_SETTINGS, COPY,
    GENERATE,
};
use super::{wizard, HandlerResult, QuizDialogue, State};

/// Telegram rejects longer text messages.
const MESSAGE_LIMIT: usize = 4096;

const STILL_GENERATING: &str = "Still generating, hang on…";
const GENERIC_FAILURE: &str = "An error occurred while generating. Please try again.";

/// Copying in a chat means sending the text back as its own message.
#[derive(Default)]
pub struct ChatClipboard {
    text: Option<String>,
}

impl ChatClipboard {
    pub fn take(&mut self) -> Option<String> {
        self.text.take()
    }
}

impl Clipboard for ChatClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardWriteFailed> {
        let len = text.chars().count();
        if len > MESSAGE_LIMIT {
            return Err(ClipboardWriteFailed(format!(
                "{} characters do not fit in one message",
                len
            )));
        }
        self.text = Some(text.to_string());
        Ok(())
    }
}

pub async fn start_generation(
    bot: Bot,
    dialogue: QuizDialogue,
    generator: Arc<dyn Generator>,
    mut session: Session,
    chat: ChatId,
) -> HandlerResult {
    let ticket = match session.trigger() {
        Ok(Some(ticket)) => ticket,
        Ok(None) => {
            bot.send_message(chat, STILL_GENERATING).await?;
            return Ok(());
        }
        Err(e) => {
            bot.send_message(chat, e.to_string()).await?;
            let step = first_unfilled_step(&session);
            wizard::prompt_step(&bot, chat, &session, step).await?;
            dialogue.update(State::Configure { session, step }).await?;
            return Ok(());
        }
    };

    let page = session.page();
    info!(
        "chat {}: {} generation {} with {}",
        chat,
        page.title,
        ticket.epoch,
        serde_json::to_string(&ticket.params)?
    );
    let _ = bot.send_chat_action(chat, ChatAction::Typing).await;
    bot.send_message(chat, format!("Generating your {} quiz…", page.title))
        .reply_markup(actions_keyboard())
        .await?;

    let session_id = session.id();
    dialogue.update(State::Quiz { session }).await?;

    tokio::spawn(async move {
        let result = generator.generate(page.route, &ticket.params).await;
        if let Err(e) = finish_generation(bot, dialogue, session_id, ticket, result).await {
            error!("chat {}: delivering generation failed: {}", chat, e);
        }
    });
    Ok(())
}

fn first_unfilled_step(session: &Session) -> usize {
    session
        .page()
        .fields
        .iter()
        .position(|f| {
            session
                .params()
                .get(f.name)
                .and_then(|v| v.as_text())
                .map_or(false, |s| s.trim().is_empty())
        })
        .unwrap_or(0)
}

/// Applies a generator answer if the chat is still looking at the session
/// that asked for it. Anything else is dropped.
async fn finish_generation(
    bot: Bot,
    dialogue: QuizDialogue,
    session_id: u64,
    ticket: Ticket,
    result: Result<Value, GenerationFailed>,
) -> HandlerResult {
    let chat = dialogue.chat_id();
    let mut session = match dialogue.get().await? {
        Some(State::Quiz { session }) if session.id() == session_id => session,
        _ => {
            debug!("chat {}: dropping generation {} for a closed session", chat, ticket.epoch);
            return Ok(());
        }
    };
    if session.finish(ticket.epoch, result) == Completion::Stale {
        debug!("chat {}: dropping stale generation {}", chat, ticket.epoch);
        return Ok(());
    }
    dialogue.update(State::Quiz { session: session.clone() }).await?;
    show_status(&bot, chat, &session).await
}

fn question_text(index: usize, total: usize, question: &Question) -> String {
    let mut text = if total > 1 {
        format!("{}. {}", index + 1, question.prompt)
    } else {
        question.prompt.clone()
    };
    for (pos, option) in question.options.iter().enumerate() {
        text.push_str(&format!("\n{}) {}", option_label(pos), option.text));
    }
    text
}

async fn show_status(bot: &Bot, chat: ChatId, session: &Session) -> HandlerResult {
    match session.status() {
        Status::Ready(run) => show_run(bot, chat, run).await,
        Status::Failed(e) => {
            let text = e.message.clone().unwrap_or_else(|| GENERIC_FAILURE.to_string());
            bot.send_message(chat, format!("⚠️ {}", text))
                .reply_markup(actions_keyboard())
                .await?;
            Ok(())
        }
        Status::Pending => {
            bot.send_message(chat, STILL_GENERATING).await?;
            Ok(())
        }
        Status::Idle => Ok(()),
    }
}

async fn show_run(bot: &Bot, chat: ChatId, run: &QuizRun) -> HandlerResult {
    let set = run.set();
    if let Some(context) = &set.context {
        bot.send_message(chat, format!("📝 Scenario\n\n{}", context)).await?;
    }
    let total = set.questions.len();
    for (index, question) in set.questions.iter().enumerate() {
        bot.send_message(chat, question_text(index, total, question)).await?;
    }
    let hint = if total == 1 {
        "Pick your answer below.".to_string()
    } else {
        format!("Answer each question below, e.g. \"1 {}\".", option_label(0))
    };
    bot.send_message(chat, hint)
        .reply_markup(answer_keyboard(run))
        .await?;
    Ok(())
}

/// "B" for a single question, "2 B" when there are several.
fn parse_answer(run: &QuizRun, text: &str) -> Option<(usize, OptionId)> {
    let mut parts = text.split_whitespace();
    let first = parts.next()?;
    let (index, label) = match (parts.next(), parts.next()) {
        (Some(label), None) => (first.parse::<usize>().ok()?.checked_sub(1)?, label),
        (None, None) if run.set().questions.len() == 1 => (0, first),
        _ => return None,
    };
    let option = run.question(index)?.options.get(label_position(label)?)?;
    Some((index, option.id.clone()))
}

pub async fn quiz(
    bot: Bot,
    dialogue: QuizDialogue,
    generator: Arc<dyn Generator>,
    session: Session,
    msg: Message,
) -> HandlerResult {
    let chat = msg.chat.id;
    let Some(text) = msg.text() else {
        bot.send_message(chat, "Please use the buttons below.").await?;
        return Ok(());
    };
    if session.is_pending() {
        bot.send_message(chat, STILL_GENERATING).await?;
        return Ok(());
    }

    match text {
        GENERATE => start_generation(bot, dialogue, generator, session, chat).await,
        CHANGE_SETTINGS => {
            wizard::prompt_step(&bot, chat, &session, 0).await?;
            dialogue.update(State::Configure { session, step: 0 }).await?;
            Ok(())
        }
        COPY => {
            let mut clipboard = ChatClipboard::default();
            if session.copy_feedback(&mut clipboard) {
                if let Some(copied) = clipboard.take() {
                    bot.send_message(chat, copied).await?;
                }
            }
            Ok(())
        }
        _ => answer(bot, dialogue, session, chat, text).await,
    }
}

async fn answer(
    bot: Bot,
    dialogue: QuizDialogue,
    mut session: Session,
    chat: ChatId,
    text: &str,
) -> HandlerResult {
    let Some(run) = session.run() else {
        bot.send_message(chat, "There is no question yet. Tap Generate again.")
            .reply_markup(actions_keyboard())
            .await?;
        return Ok(());
    };
    let Some((index, option)) = parse_answer(run, text) else {
        bot.send_message(chat, "Please tap one of the answer buttons.")
            .reply_markup(answer_keyboard(run))
            .await?;
        return Ok(());
    };
    if run.is_answered(index) {
        bot.send_message(chat, format!("You already answered question {}.", index + 1))
            .await?;
        return Ok(());
    }

    let feedback = session.answer(index, &option)?;
    let Some(run) = session.run() else {
        return Ok(());
    };
    let total = run.set().questions.len();
    let mut reply = if total > 1 {
        format!("Question {}: {}", index + 1, feedback)
    } else {
        feedback.to_string()
    };
    if total > 1 && run.is_complete() {
        let (correct, total) = run.score();
        reply.push_str(&format!("\n\nYou got {} of {} right.", correct, total));
    }
    bot.send_message(chat, reply)
        .reply_markup(answer_keyboard(run))
        .await?;
    dialogue.update(State::Quiz { session }).await?;
    Ok(())
}
