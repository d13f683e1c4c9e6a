use cyberquiz::resources::{Resource, ResourceBrowser};
use teloxide::prelude::*;

use super::keyboards::{resources_keyboard, ALL_CATEGORIES, RANDOM, SORT};
use super::{HandlerResult, QuizDialogue, State};

fn listing_text(browser: &ResourceBrowser) -> String {
    let items = browser.listing();
    if items.is_empty() {
        return "No resources found.".to_string();
    }
    let heading = browser.category().unwrap_or("all categories");
    let mut text = format!("Resources in {}:", heading);
    for Resource { name, url } in items {
        text.push_str(&format!("\n• {}: {}", name, url));
    }
    text
}

pub async fn enter(bot: Bot, dialogue: QuizDialogue, chat: ChatId) -> HandlerResult {
    let browser = ResourceBrowser::new();
    bot.send_message(
        chat,
        format!(
            "{}\n\nType anything to search by name, or pick a category.",
            listing_text(&browser)
        ),
    )
    .reply_markup(resources_keyboard())
    .await?;
    dialogue.update(State::Resources { browser }).await?;
    Ok(())
}

pub async fn browse(
    bot: Bot,
    dialogue: QuizDialogue,
    mut browser: ResourceBrowser,
    msg: Message,
) -> HandlerResult {
    let Some(text) = msg.text() else {
        bot.send_message(msg.chat.id, "Type a search term or use the buttons below.")
            .await?;
        return Ok(());
    };

    let reply = match text {
        RANDOM => match browser.random(&mut rand::thread_rng()) {
            Some(Resource { name, url }) => format!("🎲 {}\n{}", name, url),
            None => "No resources found.".to_string(),
        },
        SORT => {
            let sorted = browser.toggle_sort();
            log::debug!("chat {}: resources sorted = {}", msg.chat.id, sorted);
            listing_text(&browser)
        }
        ALL_CATEGORIES => {
            browser.select_category(None);
            listing_text(&browser)
        }
        other => {
            if !browser.select_category(Some(other)) {
                browser.search(other);
            }
            listing_text(&browser)
        }
    };

    bot.send_message(msg.chat.id, reply)
        .reply_markup(resources_keyboard())
        .await?;
    dialogue.update(State::Resources { browser }).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_listing_says_so() {
        let mut browser = ResourceBrowser::new();
        browser.search("no such resource anywhere");
        assert_eq!(listing_text(&browser), "No resources found.");
    }

    #[test]
    fn listing_names_the_category() {
        let mut browser = ResourceBrowser::new();
        assert!(browser.select_category(Some("reddit")));
        let text = listing_text(&browser);
        assert!(text.starts_with("Resources in reddit:"));
        assert!(text.contains("r/CompTIA: https://www.reddit.com/r/CompTIA/"));
    }
}
