//! Client Tests
//!
//! `LineClient` and `HttpSearchClient` against a local mock server.

use crate::actors::messages::{ActorError, AppError};
use crate::actors::traits::{LeaveService, ProfileService, ReplySink, SearchService};
use crate::clients::{HttpSearchClient, LineClient};
use crate::config::ResponderConfig;
use crate::models::{ConversationKind, OutboundMessage};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn search_client(server: &MockServer, timeout_secs: u64) -> HttpSearchClient {
    let config = ResponderConfig {
        youtube_api_url: server.uri(),
        youtube_api_key: Some("yt-key".to_string()),
        weather_api_url: server.uri(),
        weather_api_key: Some("ow-key".to_string()),
        advice_api_url: server.uri(),
        search_timeout_secs: timeout_secs,
        ..ResponderConfig::default()
    };
    HttpSearchClient::from_config(&config).unwrap()
}

#[cfg(test)]
mod line_client_tests {
    use super::*;

    #[tokio::test]
    async fn test_reply_posts_envelope_with_bearer_token() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/bot/message/reply"))
            .and(header("authorization", "Bearer channel-secret"))
            .and(body_json(json!({
                "replyToken": "token-1",
                "messages": [{ "type": "text", "text": "Hi there!" }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = LineClient::new(mock_server.uri(), Some("channel-secret".to_string())).unwrap();
        client
            .send_reply("token-1".to_string(), vec![OutboundMessage::text("Hi there!")])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_reply_failure_carries_status() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/bot/message/reply"))
            .respond_with(ResponseTemplate::new(400).set_body_string("Invalid reply token"))
            .mount(&mock_server)
            .await;

        let client = LineClient::new(mock_server.uri(), None).unwrap();
        let result = client
            .send_reply("stale".to_string(), vec![OutboundMessage::text("hi")])
            .await;
        match result {
            Err(AppError::Actor(ActorError::Collaborator(msg))) => {
                assert!(msg.contains("400"));
                assert!(msg.contains("Invalid reply token"));
            }
            other => panic!("expected collaborator error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_profile_of_user() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/bot/profile/U1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "userId": "U1",
                "displayName": "Alice",
                "statusMessage": "Hello world",
                "pictureUrl": "https://example.com/alice.png"
            })))
            .mount(&mock_server)
            .await;

        let client = LineClient::new(mock_server.uri(), None).unwrap();
        let profile = client.profile("U1".to_string(), None).await.unwrap();
        assert_eq!(profile.display_name, "Alice");
        assert_eq!(profile.status_message.as_deref(), Some("Hello world"));
    }

    #[tokio::test]
    async fn test_profile_of_group_member() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/bot/group/G1/member/Umaster"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "displayName": "Master"
            })))
            .mount(&mock_server)
            .await;

        let client = LineClient::new(mock_server.uri(), None).unwrap();
        let profile = client
            .profile("Umaster".to_string(), Some("G1".to_string()))
            .await
            .unwrap();
        assert_eq!(profile.display_name, "Master");
        assert_eq!(profile.picture_url, None);
    }

    #[tokio::test]
    async fn test_leave_room() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/bot/room/R1/leave"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = LineClient::new(mock_server.uri(), None).unwrap();
        client.leave(ConversationKind::Room, "R1".to_string()).await.unwrap();
    }

    #[tokio::test]
    async fn test_leave_direct_chat_is_an_error() {
        let client = LineClient::new("http://127.0.0.1:9", None).unwrap();
        let result = client.leave(ConversationKind::Direct, "U1".to_string()).await;
        assert_eq!(
            result,
            Err(ActorError::Collaborator("Bot can't leave from 1:1 chat".to_string()))
        );
    }
}

#[cfg(test)]
mod search_client_tests {
    use super::*;

    #[tokio::test]
    async fn test_video_search_returns_first_hit() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "kurt cobain"))
            .and(query_param("key", "yt-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{ "id": { "kind": "youtube#video", "videoId": "hTWKbfoikeg" } }]
            })))
            .mount(&mock_server)
            .await;

        let video = search_client(&mock_server, 3)
            .video("kurt cobain".to_string())
            .await
            .unwrap();
        assert_eq!(video.share_url(), "https://youtu.be/hTWKbfoikeg");
    }

    #[tokio::test]
    async fn test_video_search_without_items() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .mount(&mock_server)
            .await;

        let result = search_client(&mock_server, 3).video("zzzz".to_string()).await;
        assert!(matches!(result, Err(ActorError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_weather_report() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "kurashiki"))
            .and(query_param("units", "metric"))
            .and(query_param("appid", "ow-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "weather": [{ "id": 802, "main": "Clouds", "description": "scattered clouds", "icon": "03d" }],
                "main": { "temp": 21.5, "feels_like": 21.0, "temp_min": 19, "temp_max": 23.2, "pressure": 1012, "humidity": 64 },
                "sys": { "country": "JP" },
                "name": "Kurashiki",
                "cod": 200
            })))
            .mount(&mock_server)
            .await;

        let report = search_client(&mock_server, 3)
            .weather("kurashiki".to_string())
            .await
            .unwrap();
        assert_eq!(report.location(), "Kurashiki, JP");
        assert_eq!(report.icon_url(), "https://openweathermap.org/img/wn/03d@2x.png");
        assert_eq!(
            report.summary(),
            "We have scattered clouds in Kurashiki, JP. \nThe current temperature is 21.5°C, the lowest for today is 19.0°C and the highest is 23.2°C. \nHumidity is at 64.0%."
        );
    }

    #[tokio::test]
    async fn test_unknown_city_is_not_found() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({ "cod": "404", "message": "city not found" })),
            )
            .mount(&mock_server)
            .await;

        let result = search_client(&mock_server, 3).weather("atlantis".to_string()).await;
        assert!(matches!(result, Err(ActorError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_weather_server_error_is_not_not_found() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "cod": 401,
                "message": "Invalid API key"
            })))
            .mount(&mock_server)
            .await;

        let result = search_client(&mock_server, 3).weather("tokyo".to_string()).await;
        assert!(matches!(result, Err(ActorError::Collaborator(_))));
    }

    #[tokio::test]
    async fn test_slow_search_times_out() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(std::time::Duration::from_secs(3)),
            )
            .mount(&mock_server)
            .await;

        let result = search_client(&mock_server, 1).weather("tokyo".to_string()).await;
        assert!(matches!(result, Err(ActorError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_advice_slip() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/advice/search/love"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_results": "1",
                "query": "love",
                "slips": [{ "id": 5, "advice": "Never cut your own fringe.", "date": "2015-06-14" }]
            })))
            .mount(&mock_server)
            .await;

        let advice = search_client(&mock_server, 3)
            .advice("love".to_string())
            .await
            .unwrap();
        assert_eq!(advice.text, "Never cut your own fringe.");
    }

    #[tokio::test]
    async fn test_advice_notice_is_not_found() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/advice/search/zzzz"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": { "type": "notice", "text": "No advice slips found matching that search term." }
            })))
            .mount(&mock_server)
            .await;

        let result = search_client(&mock_server, 3).advice("zzzz".to_string()).await;
        assert_eq!(
            result,
            Err(ActorError::NotFound(
                "No advice slips found matching that search term.".to_string()
            ))
        );
    }
}
