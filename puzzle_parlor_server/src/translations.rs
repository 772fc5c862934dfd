use std::collections::HashMap;

use puzzle_parlor_core::Locale;

// (键, 土耳其语, 英语)
const TABLE: &[(&str, &str, &str)] = &[
    ("mainTitle", "Oyun Salonu", "Game Parlor"),
    ("mainSubtitle", "Bir oyun seç ve eğlenmeye başla!", "Pick a game and start having fun!"),
    ("sudoku", "Sudoku", "Sudoku"),
    ("sudokuDesc", "Sayıları doğru yerlere yerleştir", "Place the numbers in the right cells"),
    ("memory", "Hafıza Oyunu", "Memory Game"),
    ("memoryDesc", "Eşleşen kartları bul", "Find the matching cards"),
    ("plates", "Ülke Plakaları", "Country Plates"),
    ("platesDesc", "Plaka kodundan ülkeyi bul", "Guess the country from its plate code"),
    ("capitals", "Başkentler", "Capitals"),
    ("capitalsDesc", "Ülkelerin başkentlerini bil", "Name the capital of each country"),
    ("cities", "Şehirler", "Cities"),
    ("citiesDesc", "Şehrin hangi ülkede olduğunu bul", "Find which country a city is in"),
    ("words", "Kelime Oyunu", "Word Game"),
    ("wordsDesc", "Karışık harflerden kelimeyi oluştur", "Build the word from scrambled letters"),
    ("loading", "Yükleniyor...", "Loading..."),
    ("backToMenu", "Menüye Dön", "Back to Menu"),
    ("restart", "Yeniden Dene", "Retry"),
    ("playAgain", "Tekrar Oyna", "Play Again"),
    ("newGame", "Yeni Oyun", "New Game"),
    ("score", "Puan", "Score"),
    ("question", "Soru", "Question"),
    ("gameOver", "Oyun Bitti", "Game Over"),
    ("successRate", "Başarı Oranı", "Success Rate"),
    ("congratulations", "Tebrikler!", "Congratulations!"),
    ("correct", "Doğru", "Correct"),
    ("wrong", "Yanlış", "Wrong"),
    ("correctAnswer", "Doğru cevap", "Correct answer"),
    ("moves", "Hamle", "Moves"),
    ("time", "Süre", "Time"),
    ("difficulty", "Zorluk", "Difficulty"),
    ("theme", "Tema", "Theme"),
    ("children", "Çocuk", "Children"),
    ("easy", "Kolay", "Easy"),
    ("medium", "Orta", "Medium"),
    ("hard", "Zor", "Hard"),
    ("check", "Kontrol Et", "Check"),
    ("solution", "Çözümü Göster", "Show Solution"),
    ("submit", "Gönder", "Submit"),
    ("whichCountryPlate", "Bu plaka hangi ülkeye ait?", "Which country does this plate belong to?"),
    ("whichCapital", "Bu ülkenin başkenti neresi?", "What is the capital of this country?"),
    ("whichCountryCity", "Bu şehir hangi ülkede?", "Which country is this city in?"),
    ("arrangeLetters", "Harfleri doğru sıraya diz", "Arrange the letters in the right order"),
    ("emojis", "Meyveler", "Fruits"),
    ("animals", "Hayvanlar", "Animals"),
    ("sports", "Sporlar", "Sports"),
    ("vehicles", "Araçlar", "Vehicles"),
    ("hearts", "Kalpler", "Hearts"),
];

pub fn translations(locale: Locale) -> HashMap<String, String> {
    TABLE
        .iter()
        .map(|&(key, tr, en)| {
            let text = match locale {
                Locale::Tr => tr,
                Locale::En => en,
            };
            (key.to_string(), text.to_string())
        })
        .collect()
}
