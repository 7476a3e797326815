//! Send one persona-conditioned request through ChatBrain.
//!
//! Run with: cargo run -p chat-brain --example test_chat
//! Or with a custom line: cargo run -p chat-brain --example test_chat -- "Votre message"
//!
//! Make sure to set environment variables in .env:
//!   CHAT_API_KEY - API key for the chat completion endpoint

use chat_brain::{Brain, ChatBrain, ChatTurn, GenerationRequest};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let message_text = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        "Bonjour tout le monde !".to_string()
    };

    let brain = ChatBrain::from_env()?;
    println!("Brain initialized: {}", brain.name());
    println!("API URL: {}", brain.config().api_url);
    println!("Model: {}", brain.config().model);
    println!();

    let request = GenerationRequest::new(
        "lea",
        "Tu es Léa, une joueuse chaleureuse qui adore les jeux de société. \
         Réponds en une ou deux phrases courtes, comme dans un chat.",
        format!("Alice vient d'écrire : \"{}\". Réponds-lui.", message_text),
    )
    .with_context(vec![ChatTurn::new("Alice", message_text.clone())])
    .with_max_tokens(80);

    println!("Sending: \"{}\"", message_text);
    let text = brain.generate(request).await?;

    println!("=== Léa ===");
    println!("{}", text);
    println!("===========");

    Ok(())
}
