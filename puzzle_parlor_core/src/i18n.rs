use crate::content::Locale;
use std::collections::HashMap;

/// 翻译表
///
/// `lookup` 找不到时原样返回键本身，界面永远不会因缺少翻译而出错。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translations {
    locale: Locale,
    entries: HashMap<String, String>,
}

impl Translations {
    pub fn new(locale: Locale, entries: HashMap<String, String>) -> Self {
        Self { locale, entries }
    }

    /// 内置的最小翻译表，在服务端翻译到达之前使用
    pub fn builtin(locale: Locale) -> Self {
        let pairs: &[(&str, &str)] = match locale {
            Locale::Tr => &[
                ("mainTitle", "Oyun Salonu"),
                ("loading", "Yükleniyor..."),
                ("backToMenu", "Menüye Dön"),
                ("score", "Puan"),
                ("question", "Soru"),
                ("gameOver", "Oyun Bitti"),
                ("successRate", "Başarı Oranı"),
                ("congratulations", "Tebrikler!"),
                ("wrong", "Yanlış"),
                ("correct", "Doğru"),
                ("moves", "Hamle"),
                ("time", "Süre"),
            ],
            Locale::En => &[
                ("mainTitle", "Game Parlor"),
                ("loading", "Loading..."),
                ("backToMenu", "Back to Menu"),
                ("score", "Score"),
                ("question", "Question"),
                ("gameOver", "Game Over"),
                ("successRate", "Success Rate"),
                ("congratulations", "Congratulations!"),
                ("wrong", "Wrong"),
                ("correct", "Correct"),
                ("moves", "Moves"),
                ("time", "Time"),
            ],
        };
        let entries = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Self { locale, entries }
    }

    pub fn lookup<'a>(&'a self, key: &'a str) -> &'a str {
        self.entries.get(key).map(String::as_str).unwrap_or(key)
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
