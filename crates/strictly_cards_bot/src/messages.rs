//! User-facing texts and reply keyboards.

use crate::reply::Keyboard;
use rand::seq::SliceRandom;
use strictly_cards::DeckError;

/// Reply keyboard button labels. Incoming text is matched against these.
pub mod buttons {
    /// Show a client card.
    pub const CLIENT: &str = "👩🏻‍🦳 Клиент";
    /// Show another client card.
    pub const NEW_CLIENT: &str = "🔄 Новый клиент";
    /// Deal a manager hand.
    pub const MANAGER: &str = "😊 Менеджер";
    /// Draw one manager card.
    pub const DRAW: &str = "➕ Добрать карту";
    /// Show the hand.
    pub const SHOW_HAND: &str = "📋 Показать руку";
    /// Reset the session.
    pub const NEW_GAME: &str = "🔄 Новая игра";
    /// Older label for reset.
    pub const RESET_ALL: &str = "🔄 Сбросить все";
    /// Show the rules.
    pub const ABOUT: &str = "❓ Об игре";
    /// Prefix of the per-slot discard buttons.
    pub const DISCARD_PREFIX: &str = "⬆️ Карта";
    /// Start command button.
    pub const START: &str = "/start";

    /// Discard button for a 1-based slot.
    pub fn discard(slot: usize) -> String {
        format!("{DISCARD_PREFIX} {slot}")
    }
}

/// Greetings shown with the main menu.
pub const GREETINGS: [&str; 4] = [
    "Привет! Готов к новым карточкам? 🎲",
    "Снова в деле! 💼",
    "Раздаю карты как маг! 🎩✨",
    "Кого сегодня удивим? 😏",
];

/// Rules of the exercise.
pub const ABOUT_TEXT: &str = "🎲 Об игре

Добро пожаловать в настольную обучающую игру, построенную на реальных \
возражениях клиентов и проверенных аргументах, которые работают.

📚 Она состоит из двух типов карточек:

🃏 Карточки клиентов. На них:
- Фраза, которую говорит клиент,
- Боль, стоящая за этой фразой,
- И вопрос: что вы скажете, чтобы он задумался?

👔 Карточки менеджеров: варианты ответов. Каждая содержит:
- 🧠 Зерно сомнения: короткую фразу, которая сбивает шаблон клиента
- 🗣️ Речевой модуль: ваш основной ответ
- 🎯 Фокус: на чём делать акцент (гарантия, опыт, монтаж и т.д.)

🎮 Как играть?
1️⃣ Берите карточку клиента и читайте вслух
2️⃣ Подбирайте подходящую карточку менеджера
3️⃣ Отвечайте клиенту в два шага:
   - 🧠 Сначала зерно сомнения (лёгкий «тычок» в его уверенность)
   - 🗣️ Потом речевой модуль (покажите экспертность)

✨ Гибкость карточек
Карточки менеджеров не догма!
- Меняйте слова, формулировки
- Говорите своим языком
- Главное, сохраните структуру:
  🧠 → 🗣️ → 🎯

🏆 Зачем это нужно?
- Тренировка на реальных ситуациях
- Развитие уверенности в разговоре
- Больше закрытых клиентов, меньше уходов к конкурентам

🚀 Удачи в игре!";

/// Header above a client card.
pub const CLIENT_CARD_HEADER: &str = "👇 Карточка клиента:";
/// Prompt above a keyboard.
pub const CHOOSE_ACTION: &str = "Выберите действие:";
/// Shown when the hand is empty.
pub const NO_MANAGER_CARDS: &str = "ℹ️ У вас пока нет карт менеджеров";
/// Shown after a reset.
pub const GAME_RESET: &str = "🔄 Игра сброшена! Можно начать заново.";
/// Shown after `/help`.
pub const PRESS_START: &str = "Нажмите /start чтобы начать игру!";
/// Non-admin asked for `/stats`.
pub const ADMIN_ONLY: &str = "❌ Эта команда доступна только администратору";
/// Discard text whose number did not parse.
pub const INVALID_SLOT: &str = "ℹ️ Некорректный номер карты";

/// Header above the hand keyboard.
pub fn hand_header(count: usize) -> String {
    format!("📋 Ваши карты менеджеров ({count} шт.):")
}

/// Caption of a card in the hand album.
pub fn slot_caption(slot: usize) -> String {
    format!("Карта {slot}")
}

/// Caption of a just-used card.
pub fn used_caption(slot: usize) -> String {
    format!("Карта {slot} использована!")
}

/// A random greeting plus the action prompt.
pub fn greeting() -> String {
    let greeting = GREETINGS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(GREETINGS[0]);
    format!("{greeting}\n{CHOOSE_ACTION}")
}

/// User-facing text for each error kind.
pub fn error_message(err: &DeckError) -> &'static str {
    match err {
        DeckError::PoolUnavailable { .. } => "⚠️ Карты сейчас недоступны, попробуйте позже",
        DeckError::InsufficientDeck { .. } => {
            "❌ Менеджеры все в отпуске! Нужно минимум 6 карточек."
        }
        DeckError::DeckExhausted => "ℹ️ Все карты розданы! Нажмите 🔄 Новая игра, чтобы начать заново.",
        DeckError::EmptyDeck => "❌ В папке клиентов пусто! Добавьте карточек.",
        DeckError::InvalidSlot { .. } => INVALID_SLOT,
    }
}

/// Menu shown after `/start` and reset.
pub fn main_keyboard() -> Keyboard {
    Keyboard::new(vec![
        vec![buttons::CLIENT.into(), buttons::MANAGER.into()],
        vec![buttons::SHOW_HAND.into(), buttons::NEW_GAME.into()],
        vec![buttons::ABOUT.into()],
    ])
}

/// Menu shown under a client card.
pub fn client_keyboard() -> Keyboard {
    Keyboard::new(vec![
        vec![buttons::NEW_CLIENT.into(), buttons::MANAGER.into()],
        vec![buttons::SHOW_HAND.into(), buttons::NEW_GAME.into()],
        vec![buttons::ABOUT.into()],
    ])
}

/// Menu shown under the hand: one discard button per slot.
pub fn hand_keyboard(hand_len: usize) -> Keyboard {
    Keyboard::new(vec![
        (1..=hand_len).map(buttons::discard).collect(),
        vec![buttons::DRAW.into(), buttons::CLIENT.into()],
        vec![buttons::SHOW_HAND.into(), buttons::NEW_GAME.into()],
        vec![buttons::ABOUT.into()],
    ])
}

/// Single `/start` button that disappears after use.
pub fn start_keyboard() -> Keyboard {
    Keyboard::new(vec![vec![buttons::START.into()]]).one_time()
}
