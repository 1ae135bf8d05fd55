//! User-visible strings for each supported locale.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Supported UI locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "zh-TW")]
    ZhTw,
}

/// String table for one locale.
#[derive(Debug)]
pub struct Strings {
    pub heading: &'static str,
    pub email_label: &'static str,
    pub password_label: &'static str,
    pub submit_label: &'static str,
    pub submit_busy_label: &'static str,
    pub invalid_email: &'static str,
    pub password_too_short: &'static str,
    pub password_composition: &'static str,
    pub login_failed: &'static str,
    pub session_expired: &'static str,
    pub key_hints: [(&'static str, &'static str); 3],
}

static EN: Strings = Strings {
    heading: "welcome back",
    email_label: "email",
    password_label: "password",
    submit_label: "log in",
    submit_busy_label: "logging in...",
    invalid_email: "please enter a valid email format",
    password_too_short: "password must be at least 8 characters",
    password_composition: "password must contain letters and digits",
    login_failed: "login failed, please try again",
    session_expired: "your session has expired, please log in again",
    key_hints: [("Tab", "next"), ("Enter", "submit"), ("Esc", "quit")],
};

static ZH_TW: Strings = Strings {
    heading: "歡迎回來",
    email_label: "電子郵件",
    password_label: "密碼",
    submit_label: "登入",
    submit_busy_label: "登入中...",
    invalid_email: "請輸入有效的 Email 格式",
    password_too_short: "密碼必須至少 8 個字元",
    password_composition: "密碼必須包含英文字母和數字",
    login_failed: "登入失敗，請稍後再試",
    session_expired: "Session 已過期，請重新登入",
    key_hints: [("Tab", "下一個"), ("Enter", "送出"), ("Esc", "離開")],
};

impl Locale {
    pub fn strings(self) -> &'static Strings {
        match self {
            Locale::En => &EN,
            Locale::ZhTw => &ZH_TW,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::ZhTw => "zh-TW",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            "zh-tw" | "zh_tw" | "zh-hant" => Ok(Locale::ZhTw),
            other => Err(format!("unsupported locale '{other}' (expected en or zh-TW)")),
        }
    }
}
