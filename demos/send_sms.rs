use std::io;

use skebby::{
    Config, Message, MessageOptions, MessageText, Method, Password, RawPhoneNumber, Sender,
    SkebbyClient, Username,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let username = required_env("SKEBBY_USERNAME")?;
    let password = required_env("SKEBBY_PASSWORD")?;
    let sender = required_env("SKEBBY_SENDER")?;
    let phone = required_env("SKEBBY_PHONE")?;
    let text = std::env::var("SKEBBY_MESSAGE")
        .unwrap_or_else(|_| "Hello from the skebby demo.".to_owned());
    let method = std::env::var("SKEBBY_METHOD")
        .unwrap_or_else(|_| "test_send_sms_classic".to_owned())
        .parse::<Method>()?;

    let config = Config::new(
        Username::new(username)?,
        Password::new(password)?,
        Sender::new(sender)?,
        method,
    );
    let client = SkebbyClient::new(config)?;

    let message = Message::new(
        vec![RawPhoneNumber::new(phone)?],
        MessageText::new(text)?,
        MessageOptions::default(),
    );

    for (index, response) in client.send(&message).await?.iter().enumerate() {
        println!("chunk {index}: {}", response.raw().trim_end());
    }

    Ok(())
}

fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}
