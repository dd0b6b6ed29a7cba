/*
[INPUT]:  PEM public key file, base64 signature, raw body file
[OUTPUT]: Verification outcome and the parsed webhook event
[POS]:    Examples - webhook signature verification
[UPDATE]: When changing webhook verification or event parsing
*/

use freshchat_adapter::*;

/// Example: verify a captured webhook delivery
///
/// Usage: webhook_example <public_key.pem> <signature> <body.json>
fn main() {
    println!("=== Freshchat Webhook Example ===\n");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [key_path, signature, body_path] = args.as_slice() else {
        eprintln!("Usage: webhook_example <public_key.pem> <signature> <body.json>");
        return;
    };

    let (public_key, body) = match (
        std::fs::read_to_string(key_path),
        std::fs::read(body_path),
    ) {
        (Ok(key), Ok(body)) => (key, body),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("Failed to read input: {}", e);
            return;
        }
    };

    let verifier = WebhookVerifier::new(public_key);
    match verifier.verify_event(signature, &body) {
        Ok(event) => {
            println!("✓ Signature verified");
            println!("  action: {:?}", event.action);
            println!("  conversation: {:?}", event.conversation_id());
            if let EventData::Message(incoming) = &event.data {
                println!("  text: {}", incoming.message.text_content());
            }
        }
        Err(FreshchatError::SignatureMismatch) => println!("✗ Signature does not match body"),
        Err(e) => println!("✗ Error: {}", e),
    }
}
