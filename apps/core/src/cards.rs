//! Flex card bodies.

use serde_json::{json, Value};

pub const WEATHER_CARD_ALT_TEXT: &str = "Weather results";

/// Weather bubble titled with `location`.
pub fn weather_card(location: &str) -> Value {
    json!({
        "type": "bubble",
        "hero": {
            "type": "image",
            "url": "https://openweathermap.org/img/wn/02d@2x.png",
            "size": "md",
            "aspectMode": "fit"
        },
        "body": {
            "type": "box",
            "layout": "vertical",
            "contents": [
                {
                    "type": "icon",
                    "size": "xxs",
                    "url": "https://openweathermap.org/images/flags/jp.png"
                },
                {
                    "type": "text",
                    "text": location,
                    "weight": "regular",
                    "size": "lg"
                },
                {
                    "type": "box",
                    "layout": "vertical",
                    "margin": "lg",
                    "spacing": "sm",
                    "contents": [
                        info_row("Place", "Shinjuku, Tokyo"),
                        info_row("Time", "10:00 - 23:00")
                    ]
                }
            ]
        },
        "footer": {
            "type": "box",
            "layout": "vertical",
            "spacing": "sm",
            "contents": [
                { "type": "spacer", "size": "sm" },
                { "type": "separator" },
                {
                    "type": "text",
                    "text": "Courtesy of OpenWeather®",
                    "weight": "regular",
                    "size": "xs"
                }
            ]
        }
    })
}

fn info_row(label: &str, value: &str) -> Value {
    json!({
        "type": "box",
        "layout": "baseline",
        "spacing": "sm",
        "contents": [
            { "type": "text", "text": label, "color": "#aaaaaa", "size": "sm", "flex": 1 },
            { "type": "text", "text": value, "wrap": true, "color": "#666666", "size": "sm", "flex": 5 }
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_is_location() {
        let card = weather_card("Kurashiki, JP");
        assert_eq!(card["type"], "bubble");
        assert_eq!(card["body"]["contents"][1]["text"], "Kurashiki, JP");
        assert_eq!(card["footer"]["contents"][2]["text"], "Courtesy of OpenWeather®");
    }
}
