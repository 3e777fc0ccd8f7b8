use contact_client::{ContactClient, FormState, Submission, SubmitOutcome, submit::submit_form};

use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let base_url = env::var("RELAY_URL").unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());

    let mut args = env::args().skip(1);
    let (Some(name), Some(email), Some(message)) = (args.next(), args.next(), args.next()) else {
        eprintln!("usage: contact-client <name> <email> <message>");
        std::process::exit(2);
    };

    let client = ContactClient::new(&base_url)?;
    println!("Submitting contact form to {}", client.endpoint());

    let mut form = FormState {
        fields: Submission {
            name,
            email,
            message,
        },
        ..FormState::default()
    };

    match submit_form(&client, &mut form).await {
        SubmitOutcome::Sent => {
            println!("Message sent successfully");
            Ok(())
        }
        SubmitOutcome::Failed(failure) => {
            eprintln!("Message was not sent: {failure}");
            std::process::exit(1);
        }
    }
}
