use pp_core::SmsSender;
use pp_shared::SmsConfig;

use crate::sms::create_sms_sender;
use crate::InfrastructureError;

#[tokio::test]
async fn test_create_mock_sender() {
    let sender = create_sms_sender(&SmsConfig::default()).unwrap();
    let id = sender
        .send("100000000", &["123456".to_string()], "+15550104477")
        .await
        .unwrap();
    assert!(id.starts_with("mock-msg-"));
}

#[tokio::test]
async fn test_unknown_provider_falls_back_to_mock() {
    let config = SmsConfig {
        provider: "carrier-pigeon".to_string(),
        ..SmsConfig::default()
    };

    let sender = create_sms_sender(&config).unwrap();
    assert!(sender
        .send("100000000", &["123456".to_string()], "+15550104477")
        .await
        .is_ok());
}

#[test]
fn test_twilio_without_credentials_is_rejected() {
    let config = SmsConfig {
        provider: "twilio".to_string(),
        ..SmsConfig::default()
    };

    assert!(matches!(
        create_sms_sender(&config),
        Err(InfrastructureError::Config(_))
    ));
}
