//! Tests against a real application.

#[cfg(test)]
mod tests {
    use rustpush_core::PushError;
    use serde_json::json;

    use crate::{live_client, test_channel_name};

    #[test]
    #[ignore = "requires application credentials"]
    fn test_should_trigger_event_on_fresh_channel() {
        let client = live_client();
        let channel = test_channel_name("events");

        let outcome = client
            .trigger(&[channel.as_str()], "my-event", &json!({"message": "hello"}))
            .expect("trigger");
        assert!(outcome.is_success(), "trigger should be accepted: {outcome:?}");
    }

    #[test]
    #[ignore = "requires application credentials"]
    fn test_should_return_envelope_in_debug_mode() {
        let client = live_client();
        let channel = test_channel_name("debug");
        let params = rustpush_client::TriggerParams::builder()
            .channels(vec![channel])
            .event("my-event".to_owned())
            .data(json!({"n": 1}))
            .debug(true)
            .build();

        let outcome = client.trigger_with(&params).expect("trigger");
        let envelope = outcome.envelope().expect("debug envelope");
        assert_eq!(envelope.status, 200);
    }

    #[test]
    #[ignore = "requires application credentials"]
    fn test_should_report_unoccupied_channel() {
        let client = live_client();
        let channel = test_channel_name("private-empty");

        let info = client
            .get_channel_info(&channel, &[])
            .expect("channel info")
            .expect("service should answer");
        assert_eq!(info.occupied, Some(false));
    }

    #[test]
    #[ignore = "requires application credentials"]
    fn test_should_list_channels() {
        let client = live_client();

        let channels = client
            .get_channels(&[("filter_by_prefix", "presence-")])
            .expect("channel listing");
        assert!(channels.is_some(), "listing should be answered");

        let envelope = client
            .get("/channels", &[])
            .expect("generic get")
            .expect("service should answer");
        assert!(envelope.is_ok());
        assert!(envelope.result.is_some());
    }

    #[test]
    #[ignore = "requires application credentials"]
    fn test_should_reject_too_many_channels_locally() {
        let client = live_client();
        let names: Vec<String> = (0..101).map(|i| format!("c{i}")).collect();
        let channels: Vec<&str> = names.iter().map(String::as_str).collect();

        let err = client.trigger(&channels, "e", &json!({})).unwrap_err();
        assert!(matches!(err, PushError::TooManyChannels { count: 101 }));
    }

    #[test]
    #[ignore = "requires application credentials"]
    fn test_should_issue_tokens_for_configured_key() {
        let client = live_client();
        let key = std::env::var("RUSTPUSH_KEY").expect("RUSTPUSH_KEY");

        let token = client.socket_auth("private-orders", "1234.5678", None);
        assert!(token.auth.starts_with(&format!("{key}:")));

        let token = client
            .presence_auth(
                "presence-lobby",
                "1234.5678",
                "user-1",
                Some(&json!({"name": "Ann"})),
            )
            .expect("presence auth");
        let channel_data: serde_json::Value =
            serde_json::from_str(token.channel_data.as_deref().expect("channel data")).unwrap();
        assert_eq!(channel_data["user_id"], "user-1");
        assert_eq!(channel_data["user_info"]["name"], "Ann");
    }
}
