use crate::actors::messages::{ActorError, AppError};
use crate::actors::traits::SearchService;
use crate::config::ResponderConfig;
use crate::models::{Advice, VideoResult, WeatherReport};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, instrument};
use url::Url;

/// Video, weather and advice lookups over public HTTP APIs.
#[derive(Clone)]
pub struct HttpSearchClient {
    client: Client,
    youtube_api_url: String,
    youtube_api_key: Option<String>,
    weather_api_url: String,
    weather_api_key: Option<String>,
    advice_api_url: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherResponse {
    name: String,
    sys: OpenWeatherSys,
    weather: Vec<OpenWeatherCondition>,
    main: OpenWeatherMain,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherSys {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherCondition {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: f64,
}

impl HttpSearchClient {
    pub fn from_config(config: &ResponderConfig) -> Result<Self, AppError> {
        let client = Client::builder().timeout(config.search_timeout()).build()?;
        Ok(Self {
            client,
            youtube_api_url: config.youtube_api_url.clone(),
            youtube_api_key: config.youtube_api_key.clone(),
            weather_api_url: config.weather_api_url.clone(),
            weather_api_key: config.weather_api_key.clone(),
            advice_api_url: config.advice_api_url.clone(),
            timeout: config.search_timeout(),
        })
    }

    // `base` + `segments`, each segment percent-encoded.
    fn endpoint(base: &str, segments: &[&str]) -> Result<Url, ActorError> {
        let mut url = Url::parse(base).map_err(|e| ActorError::Internal(format!("Bad endpoint {}: {}", base, e)))?;
        url.path_segments_mut()
            .map_err(|_| ActorError::Internal(format!("Bad endpoint {}", base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json(&self, url: Url) -> Result<(StatusCode, serde_json::Value), ActorError> {
        let res = timeout(self.timeout, self.client.get(url).send()).await??;
        let status = res.status();
        let body = res.text().await?;
        let json = serde_json::from_str(&body).unwrap_or(serde_json::Value::Null);
        Ok((status, json))
    }
}

#[async_trait]
impl SearchService for HttpSearchClient {
    #[instrument(skip(self))]
    async fn video(&self, keyword: String) -> Result<VideoResult, ActorError> {
        let mut url = Self::endpoint(&self.youtube_api_url, &["search"])?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("part", "snippet")
                .append_pair("type", "video")
                .append_pair("maxResults", "1")
                .append_pair("q", &keyword);
            if let Some(key) = &self.youtube_api_key {
                query.append_pair("key", key);
            }
        }

        let (status, json) = self.get_json(url).await?;
        if !status.is_success() {
            return Err(ActorError::Collaborator(format!(
                "Video search failed with status {}: {}",
                status, json["error"]["message"]
            )));
        }
        match json["items"][0]["id"]["videoId"].as_str() {
            Some(id) => {
                info!("Found video {} for '{}'", id, keyword);
                Ok(VideoResult {
                    video_id: id.to_string(),
                })
            }
            None => Err(ActorError::NotFound(format!("no video for '{}'", keyword))),
        }
    }

    #[instrument(skip(self))]
    async fn weather(&self, city: String) -> Result<WeatherReport, ActorError> {
        let mut url = Self::endpoint(&self.weather_api_url, &["weather"])?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("q", &city).append_pair("units", "metric");
            if let Some(key) = &self.weather_api_key {
                query.append_pair("appid", key);
            }
        }

        let (status, json) = self.get_json(url).await?;
        let message = json["message"].as_str().unwrap_or_default();
        if status == StatusCode::NOT_FOUND || message.contains("city not found") {
            return Err(ActorError::NotFound(format!("no weather for '{}'", city)));
        }
        if !status.is_success() {
            return Err(ActorError::Collaborator(format!(
                "Weather lookup failed with status {}: {}",
                status, message
            )));
        }

        let parsed: OpenWeatherResponse = serde_json::from_value(json)
            .map_err(|e| ActorError::Internal(format!("Malformed weather response: {}", e)))?;
        let condition = parsed
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| ActorError::NotFound(format!("no conditions for '{}'", city)))?;
        Ok(WeatherReport {
            city: parsed.name,
            country: parsed.sys.country,
            description: condition.description,
            temperature: parsed.main.temp,
            temp_min: parsed.main.temp_min,
            temp_max: parsed.main.temp_max,
            humidity: parsed.main.humidity,
            icon: condition.icon,
        })
    }

    #[instrument(skip(self))]
    async fn advice(&self, topic: String) -> Result<Advice, ActorError> {
        let url = Self::endpoint(&self.advice_api_url, &["advice", "search", &topic])?;
        let (status, json) = self.get_json(url).await?;
        if !status.is_success() {
            return Err(ActorError::Collaborator(format!(
                "Advice search failed with status {}",
                status
            )));
        }
        match json["slips"][0]["advice"].as_str() {
            Some(text) => Ok(Advice {
                text: text.to_string(),
            }),
            None => Err(ActorError::NotFound(
                json["message"]["text"]
                    .as_str()
                    .unwrap_or("no advice slips")
                    .to_string(),
            )),
        }
    }
}
