// Chat messages with known detection outcomes
#![allow(dead_code)]

/// Short transcript: two flagged lines, one blank line, two clean lines
pub const CHAT_TRANSCRIPT: &str = "Добрий день! Коли зможете почати?
пишіть на test@example.com

дзвони +380501234567
просто текст без контактів
";

/// Lines of CHAT_TRANSCRIPT that carry a contact (1-based)
pub const CHAT_FLAGGED_LINES: [usize; 2] = [2, 4];

/// Messages with no contact identifiers at all
pub const CLEAN_MESSAGES: &[&str] = &[
    "просто текст без контактів",
    "Добрий день! Коли зможете почати роботу над логотипом?",
    "Бюджет 1500 грн, термін 5 днів.",
    "Дякую, все отримав. Гарного вечора!",
    "Можу зробити 3 варіанти дизайну до п'ятниці",
    "напишу в тг завтра",
    "скинь в інста якщо що",
    "привіт @привітання",
    "номер замовлення готовий",
    "дякую, тг канал гарний",
    "скайп зламався, linkedin профіль оновлю пізніше",
    "",
];

/// Mixed corpus used for property checks; not every entry is flagged
pub const MIXED_MESSAGES: &[&str] = &[
    "пишіть на test@example.com",
    "мій тг @john_doe123",
    "дзвони +380501234567",
    "сайт example.com/page",
    "Пошта: anna.k@mail.ua, тел. (050) 123-4567, skype: anna.k",
    "інста @design.studio та telegram: @studio_bot",
    "whatsapp +380 67 123 45 67 або viber 0671234567",
    "Портфоліо на https://www.behance.net/anna-k і linkedin.com/in/anna-k",
    "discord.gg/abc123 або дискорд anna#1234",
    "email: anna (at) gmail (dot) com",
    "номер 555-123-4567, запасний (555) 987-6543",
    "Привіт 👋 мій тг @emoji_user 🚀 чекаю!",
    "Ціна 2500 грн. Домовились?",
    "mortgage rates are high",
    "@ab",
    "a@b",
    "+1",
];
