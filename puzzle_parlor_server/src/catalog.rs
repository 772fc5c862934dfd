use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use puzzle_parlor_core::{Challenge, Locale, Question, QuizCategory};

// --- 题库数据 ---

struct Country {
    plate: &'static str,       // 国际车辆识别代码
    name: [&'static str; 2],   // [tr, en]
    capital: [&'static str; 2],
    city: [&'static str; 2],   // 一个非首都的城市
}

const COUNTRIES: &[Country] = &[
    Country { plate: "TR", name: ["Türkiye", "Turkey"], capital: ["Ankara", "Ankara"], city: ["İzmir", "Izmir"] },
    Country { plate: "D", name: ["Almanya", "Germany"], capital: ["Berlin", "Berlin"], city: ["Münih", "Munich"] },
    Country { plate: "F", name: ["Fransa", "France"], capital: ["Paris", "Paris"], city: ["Marsilya", "Marseille"] },
    Country { plate: "I", name: ["İtalya", "Italy"], capital: ["Roma", "Rome"], city: ["Milano", "Milan"] },
    Country { plate: "E", name: ["İspanya", "Spain"], capital: ["Madrid", "Madrid"], city: ["Barselona", "Barcelona"] },
    Country { plate: "GB", name: ["Birleşik Krallık", "United Kingdom"], capital: ["Londra", "London"], city: ["Manchester", "Manchester"] },
    Country { plate: "NL", name: ["Hollanda", "Netherlands"], capital: ["Amsterdam", "Amsterdam"], city: ["Rotterdam", "Rotterdam"] },
    Country { plate: "GR", name: ["Yunanistan", "Greece"], capital: ["Atina", "Athens"], city: ["Selanik", "Thessaloniki"] },
    Country { plate: "BG", name: ["Bulgaristan", "Bulgaria"], capital: ["Sofya", "Sofia"], city: ["Filibe", "Plovdiv"] },
    Country { plate: "RO", name: ["Romanya", "Romania"], capital: ["Bükreş", "Bucharest"], city: ["Köstence", "Constanta"] },
    Country { plate: "H", name: ["Macaristan", "Hungary"], capital: ["Budapeşte", "Budapest"], city: ["Debrecen", "Debrecen"] },
    Country { plate: "A", name: ["Avusturya", "Austria"], capital: ["Viyana", "Vienna"], city: ["Salzburg", "Salzburg"] },
    Country { plate: "CH", name: ["İsviçre", "Switzerland"], capital: ["Bern", "Bern"], city: ["Zürih", "Zurich"] },
    Country { plate: "PL", name: ["Polonya", "Poland"], capital: ["Varşova", "Warsaw"], city: ["Krakov", "Krakow"] },
    Country { plate: "RUS", name: ["Rusya", "Russia"], capital: ["Moskova", "Moscow"], city: ["St. Petersburg", "St. Petersburg"] },
    Country { plate: "J", name: ["Japonya", "Japan"], capital: ["Tokyo", "Tokyo"], city: ["Osaka", "Osaka"] },
    Country { plate: "USA", name: ["Amerika Birleşik Devletleri", "United States"], capital: ["Washington", "Washington"], city: ["New York", "New York"] },
    Country { plate: "BR", name: ["Brezilya", "Brazil"], capital: ["Brasília", "Brasília"], city: ["Rio de Janeiro", "Rio de Janeiro"] },
    Country { plate: "ET", name: ["Mısır", "Egypt"], capital: ["Kahire", "Cairo"], city: ["İskenderiye", "Alexandria"] },
    Country { plate: "AZ", name: ["Azerbaycan", "Azerbaijan"], capital: ["Bakü", "Baku"], city: ["Gence", "Ganja"] },
];

const WORDS_TR: &[&str] = &[
    "KİTAP", "KALEM", "ELMA", "OKUL", "DENİZ", "GÜNEŞ", "ARABA", "ÇİÇEK", "MASA", "BULUT",
    "ORMAN", "KÖPRÜ", "PENCERE", "BAHÇE", "MÜZİK",
];

const WORDS_EN: &[&str] = &[
    "APPLE", "HOUSE", "WATER", "PLANET", "GARDEN", "MUSIC", "BRIDGE", "WINDOW", "FOREST", "ORANGE",
    "CLOUD", "PENCIL", "SCHOOL", "RIVER", "CASTLE",
];

const OPTION_COUNT: usize = 4;

fn pick(pair: &[&'static str; 2], locale: Locale) -> &'static str {
    match locale {
        Locale::Tr => pair[0],
        Locale::En => pair[1],
    }
}

// --- 题目生成 ---

/// 从题库中随机抽取至多 `count` 道题，选项顺序随机
pub fn sample_questions<R: Rng + ?Sized>(
    category: QuizCategory,
    locale: Locale,
    count: usize,
    rng: &mut R,
) -> Vec<Question> {
    let prompt_of = |c: &Country| match category {
        QuizCategory::Plates => c.plate,
        QuizCategory::Capitals => pick(&c.name, locale),
        QuizCategory::Cities => pick(&c.city, locale),
    };
    let answer_of = |c: &Country| match category {
        QuizCategory::Plates | QuizCategory::Cities => pick(&c.name, locale),
        QuizCategory::Capitals => pick(&c.capital, locale),
    };

    let chosen: Vec<&Country> = COUNTRIES.choose_multiple(rng, count).collect();
    chosen
        .into_iter()
        .map(|country| {
            let correct = answer_of(country);
            let mut options: Vec<String> = COUNTRIES
                .iter()
                .map(answer_of)
                .filter(|a| *a != correct)
                .collect::<Vec<_>>()
                .choose_multiple(rng, OPTION_COUNT - 1)
                .map(|a| a.to_string())
                .collect();
            options.push(correct.to_string());
            options.shuffle(rng);
            Question { prompt: prompt_of(country).to_string(), options, correct_answer: correct.to_string() }
        })
        .collect()
}

/// 随机抽取单词并打乱字母
pub fn sample_challenges<R: Rng + ?Sized>(locale: Locale, count: usize, rng: &mut R) -> Vec<Challenge> {
    let words = match locale {
        Locale::Tr => WORDS_TR,
        Locale::En => WORDS_EN,
    };
    words
        .choose_multiple(rng, count)
        .map(|word| Challenge { scrambled_word: scramble(word, rng), correct_word: word.to_string() })
        .collect()
}

/// 均匀打乱字母；单词至少有两种不同字母时保证结果与原词不同
pub fn scramble<R: Rng + ?Sized>(word: &str, rng: &mut R) -> String {
    let mut letters: Vec<char> = word.chars().collect();
    let distinct = letters.iter().any(|&c| Some(c) != letters.first().copied());
    loop {
        letters.shuffle(rng);
        let scrambled: String = letters.iter().collect();
        if !distinct || scrambled != word {
            return scrambled;
        }
    }
}
