pub mod keyboards;
pub mod quiz;
pub mod resources;
pub mod wizard;

use cyberquiz::page::{GRC_WIZARD, SCENARIO_SPHERE};
use cyberquiz::resources::ResourceBrowser;
use cyberquiz::Session;
use log::debug;
use teloxide::{dispatching::dialogue::ErasedStorage, prelude::*};

use keyboards::{menu_keyboard, MENU, MENU_ABOUT, MENU_GRC, MENU_RESOURCES, MENU_SCENARIO};

pub type QuizDialogue = Dialogue<State, ErasedStorage<State>>;
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;
pub type HandlerResult = Result<(), HandlerError>;
pub type DialogueStorage = std::sync::Arc<ErasedStorage<State>>;

#[derive(Clone, Default)]
pub enum State {
    #[default]
    Start,
    Menu,
    /// Filling in the page's fields one at a time; `step` indexes `PageSpec::fields`.
    Configure {
        session: Session,
        step: usize,
    },
    Quiz {
        session: Session,
    },
    Resources {
        browser: ResourceBrowser,
    },
}

const GREETING_TEXT: &str = "Hi! I'm CyberQuiz. I generate practice questions for \
    governance, risk and compliance, and interactive attack scenarios to test your incident response. \
    Pick where to start.";

const ABOUT_TEXT: &str = "CyberQuiz helps you prepare for security certifications.\n\n\
    GRC Wizard: one multiple-choice question on a governance, risk or compliance topic, \
    with an explanation for every option and an exam tip.\n\
    Scenario Sphere: a generated attack scenario for your industry, followed by questions \
    on how to respond.\n\
    Resources: hand-picked communities, channels and frameworks to keep studying.";

pub async fn start(bot: Bot, dialogue: QuizDialogue, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, GREETING_TEXT)
        .reply_markup(menu_keyboard())
        .await?;
    dialogue.update(State::Menu).await?;
    Ok(())
}

/// `/start`, `/menu` and the menu button work from every state.
pub fn is_menu_request(msg: Message) -> bool {
    matches!(msg.text(), Some(MENU) | Some("/menu") | Some("/start"))
}

pub async fn menu(bot: Bot, dialogue: QuizDialogue, msg: Message) -> HandlerResult {
    if let Some(State::Configure { session, .. } | State::Quiz { session }) = dialogue.get().await? {
        if session.is_pending() {
            debug!(
                "chat {} left {} with generation {} in flight",
                msg.chat.id,
                session.page().title,
                session.epoch()
            );
        }
    }
    let text = match msg.text() {
        Some("/start") => GREETING_TEXT,
        _ => "What would you like to do?",
    };
    bot.send_message(msg.chat.id, text)
        .reply_markup(menu_keyboard())
        .await?;
    dialogue.update(State::Menu).await?;
    Ok(())
}

pub async fn receive_menu_choice(bot: Bot, dialogue: QuizDialogue, msg: Message) -> HandlerResult {
    let page = match msg.text() {
        Some(MENU_GRC) => &GRC_WIZARD,
        Some(MENU_SCENARIO) => &SCENARIO_SPHERE,
        Some(MENU_RESOURCES) => {
            return resources::enter(bot, dialogue, msg.chat.id).await;
        }
        Some(MENU_ABOUT) => {
            bot.send_message(msg.chat.id, ABOUT_TEXT)
                .reply_markup(menu_keyboard())
                .await?;
            return Ok(());
        }
        _ => {
            bot.send_message(msg.chat.id, "Please pick one of the options below.")
                .reply_markup(menu_keyboard())
                .await?;
            return Ok(());
        }
    };

    let session = Session::new(page);
    debug!("chat {} opened {} (session {})", msg.chat.id, page.title, session.id());
    bot.send_message(msg.chat.id, format!("{}: let's set it up.", page.title))
        .await?;
    wizard::prompt_step(&bot, msg.chat.id, &session, 0).await?;
    dialogue.update(State::Configure { session, step: 0 }).await?;
    Ok(())
}
