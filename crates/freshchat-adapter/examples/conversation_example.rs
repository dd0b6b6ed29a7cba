/*
[INPUT]:  FRESHCHAT_* environment variables and a user email
[OUTPUT]: A created user, a conversation with an opening message, a reply
[POS]:    Examples - user and conversation lifecycle
[UPDATE]: When changing conversation operations or config variables
*/

use freshchat_adapter::*;
use tracing_subscriber::EnvFilter;

/// Example: create a user, open a conversation and post a follow-up
///
/// Needs FRESHCHAT_APP_ID, FRESHCHAT_TOKEN and FRESHCHAT_CHANNEL_ID.
/// Set RUST_LOG=freshchat_adapter=debug to see the requests.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Freshchat Conversation Example ===\n");

    let config = match FreshchatConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            return;
        }
    };
    println!("✓ Config loaded: {:?}\n", config);

    let client = match FreshchatClient::new(config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };

    println!("Creating user...");
    let new_user = User {
        email: Some("peter.griffin@example.com".into()),
        first_name: Some("Peter".into()),
        last_name: Some("Griffin".into()),
        ..User::default()
    };
    let user = match client.create_user(&new_user).await {
        Ok(user) => user,
        Err(e) => {
            eprintln!("✗ Error: {}", e);
            return;
        }
    };
    let Some(user_id) = user.id.clone() else {
        eprintln!("✗ Created user has no id");
        return;
    };
    println!("✓ User: {}\n", user_id);

    println!("Opening conversation...");
    let conversation = match client
        .create_conversation(&user_id, None, Some("Hello, I need some help"))
        .await
    {
        Ok(conversation) => conversation,
        Err(e) => {
            eprintln!("✗ Error: {}", e);
            return;
        }
    };
    println!("✓ Conversation: {:?}\n", conversation.conversation_id);

    println!("Sending follow-up...");
    match client.send_message(&conversation, "Are you there?").await {
        Ok(message) => println!("✓ Message: {:?}", message.id),
        Err(e) if e.is_retryable() => {
            println!("✗ Retryable error, retry after {:?}s: {}", e.retry_delay(), e)
        }
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n✓ Conversation example complete");
}
