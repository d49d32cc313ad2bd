//! User-facing message strings and the reserved keyboard command labels.

pub const NEXT: &str = "Дальше ⏭";
pub const ADD_WORD: &str = "Добавить слово ➕";
pub const DELETE_WORD: &str = "Удалить слово🔙";

pub fn is_command(text: &str) -> bool {
    text == NEXT || text == ADD_WORD || text == DELETE_WORD
}

pub fn command_row() -> Vec<String> {
    vec![NEXT.to_string(), ADD_WORD.to_string(), DELETE_WORD.to_string()]
}

pub const WELCOME: &str = "Привет 👋 Давай попрактикуемся в английском языке. Тренировки можешь проходить в удобном для себя темпе.

У тебя есть возможность использовать тренажёр, как конструктор, и собирать свою собственную базу для обучения. Для этого воспользуйся инструментами:

• добавить слово ➕
• удалить слово 🔙

Ну что, начнём ⬇️";

pub const NO_WORDS: &str = "Пока нет слов для изучения. Добавьте слова с помощью кнопки ниже:";

pub const STORE_UNAVAILABLE: &str = "⚠️ Тренажёр временно недоступен. Попробуйте позже.";

pub const ENTER_SOURCE: &str = "Введите слово на английском:";
pub const ENTER_TARGET: &str = "Теперь введите перевод на русском:";
pub const ENTER_DELETE: &str = "Введите английское слово, которое хотите удалить:";

pub const EMPTY_SOURCE: &str = "Слово не может быть пустым. Введите слово на английском:";
pub const EMPTY_TARGET: &str = "Перевод не может быть пустым. Введите перевод на русском:";
pub const EMPTY_DELETE: &str = "Слово не может быть пустым. Введите слово для удаления:";

pub fn question(translation: &str) -> String {
    format!("Выбери перевод слова:\n🇷🇺 {translation}")
}

pub fn correct(target: &str, translation: &str) -> String {
    format!("✅ Отлично! Правильно!\n{target} -> {translation}")
}

pub fn wrong(translation: &str) -> String {
    format!("❌ Неправильно! Попробуйте ещё раз вспомнить слово:\n🇷🇺 {translation}")
}

pub fn word_added(source: &str, target: &str, count: i64) -> String {
    format!("✅ Слово '{source}' -> '{target}' успешно добавлено!\n\n📚 Теперь вы изучаете: {count} слов")
}

pub fn word_removed(word: &str, count: i64) -> String {
    format!("✅ Слово '{word}' удалено!\n\n📚 Теперь вы изучаете: {count} слов")
}

pub fn word_not_found(word: &str) -> String {
    format!("❌ Слово '{word}' не найдено.")
}

pub const ADD_FAILED: &str = "❌ Не удалось добавить слово. Попробуйте еще раз.";

pub fn limit_reached(max: i64) -> String {
    format!("⚠️ Достигнут лимит в {max} слов. Удалите что-нибудь, прежде чем добавлять новое.")
}

pub fn stat_label(kind: &str) -> &str {
    match kind {
        "start" => "запусков тренажёра",
        "answer_correct" => "правильных ответов",
        "answer_wrong" => "неправильных ответов",
        "word_added" => "добавлено слов",
        "word_removed" => "удалено слов",
        other => other,
    }
}

pub fn stats_header(active_words: i64) -> String {
    format!("📊 Ваша статистика\n\n📚 Слов в изучении: {active_words}")
}

pub fn stats_line(kind: &str, count: i64) -> String {
    format!("• {}: {count}", stat_label(kind))
}

pub fn global_stats(total_users: i64, total_events: i64) -> String {
    format!("\n👥 Всего пользователей: {total_users}\n🗒 Всего событий: {total_events}")
}
