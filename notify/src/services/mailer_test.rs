use super::*;
use crate::config::NotifyConfig;

fn config(api_key: Option<&str>) -> NotifyConfig {
    let key = api_key.map(str::to_owned);
    NotifyConfig::from_lookup(|name| if name == "RESEND_API_KEY" { key.clone() } else { None }).unwrap()
}

#[tokio::test]
async fn log_mailer_always_succeeds() {
    let email = OutgoingEmail { to: "bo@example.com".into(), subject: "Hi".into(), html: "<p>Hi</p>".into() };
    assert!(LogMailer.send(&email).await.is_ok());
}

#[tokio::test]
async fn missing_key_selects_log_mailer() {
    let mailer = from_config(&config(None));
    let email = OutgoingEmail { to: "bo@example.com".into(), subject: "Hi".into(), html: String::new() };
    assert!(mailer.send(&email).await.is_ok());
}

#[test]
fn delivery_error_message_names_the_cause() {
    let err = MailError::Delivery("quota".into());
    assert_eq!(err.to_string(), "email delivery failed: quota");
}
