use super::*;

#[test]
fn receipt_reads_skip_flag() {
    assert_eq!(parse_receipt(r#"{"ok":true,"skipped":true}"#).unwrap(), TransportReceipt { skipped: true });
    assert_eq!(parse_receipt(r#"{"ok":true}"#).unwrap(), TransportReceipt { skipped: false });
}

#[test]
fn empty_reply_counts_as_delivered() {
    assert_eq!(parse_receipt("  ").unwrap(), TransportReceipt::default());
}

#[test]
fn malformed_reply_is_a_decode_error() {
    assert!(matches!(parse_receipt("<html>"), Err(TransportError::Decode(_))));
}

#[test]
fn transport_targets_configured_function() {
    let config = ClientConfig::from_parts(None, Some("anon"), Some("https://fn.example.com/send-notification"));
    let transport = FunctionTransport::new(&config, None);
    assert_eq!(transport.url(), "https://fn.example.com/send-notification");
    assert_eq!(transport.bearer(), "Bearer anon");
}
