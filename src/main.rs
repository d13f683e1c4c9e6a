mod bot;

use std::sync::Arc;

use bot::{DialogueStorage, State};
use cyberquiz::config::Config;
use cyberquiz::generator::{Generator, HttpGenerator};
use dotenv::dotenv;
use log::{debug, info};
use teloxide::{
    dispatching::dialogue::{ErasedStorage, InMemStorage, Storage},
    prelude::*,
};

#[tokio::main]
async fn main() {
    let dotenv_loaded = dotenv().is_ok();

    pretty_env_logger::init();
    info!("Starting cyberquiz bot...");
    if !dotenv_loaded {
        debug!("no .env file, using the process environment");
    }

    let config = Config::from_env().expect("Invalid configuration");
    info!("Generator API at {}", config.api_base);

    let generator: Arc<dyn Generator> = Arc::new(
        HttpGenerator::new(&config.api_base, config.request_timeout)
            .expect("Unable to build the HTTP client"),
    );

    let bot = Bot::from_env();
    let storage: DialogueStorage = InMemStorage::<State>::new().erase();

    Dispatcher::builder(
        bot,
        Update::filter_message()
            .enter_dialogue::<Message, ErasedStorage<State>, State>()
            .branch(dptree::filter(bot::is_menu_request).endpoint(bot::menu))
            .branch(dptree::case![State::Start].endpoint(bot::start))
            .branch(dptree::case![State::Menu].endpoint(bot::receive_menu_choice))
            .branch(dptree::case![State::Configure { session, step }].endpoint(bot::wizard::configure))
            .branch(dptree::case![State::Quiz { session }].endpoint(bot::quiz::quiz))
            .branch(dptree::case![State::Resources { browser }].endpoint(bot::resources::browse)),
    )
    .dependencies(dptree::deps![storage, generator])
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;
}
