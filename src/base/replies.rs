//! Fixed user-facing texts sent by the bot.

/// Reply to `/start`.
pub const START_REPLY: &str = r#"🌿 Привет! Я отвечаю на фразы, которые настроил администратор.

Если в сообщении встречается ровно одна знакомая фраза, я отвечу. Если несколько, промолчу.

Список команд: /help"#;

/// Header of the reply to `/help`.
pub const HELP_REPLY: &str = r#"🆘 Доступные команды:

/start - Начать работу
/help - Помощь
/about - О боте
"#;

/// Extra line of `/help` shown only to the admin.
pub const HELP_ADMIN_LINE: &str = "/admin - Команды администратора\n";

/// Reply to `/about`.
pub const ABOUT_REPLY: &str = r#"🤖 trigger-bot

Отвечает на фразы-триггеры из базы данных.
Все фразы добавляет администратор, по умолчанию база пуста."#;

/// Reply to an unknown command.
pub const UNKNOWN_COMMAND_REPLY: &str = "🤔 Неизвестная команда. Используйте /help для списка команд.";

/// Reply to `/admin` from anyone but the admin.
pub const ADMIN_FORBIDDEN_REPLY: &str = "❌ У вас нет прав для выполнения этой команды";

/// Reply to an unknown `/admin` sub-command.
pub const ADMIN_UNKNOWN_REPLY: &str = "❌ Неизвестная команда. Используйте /admin help для списка команд";

/// Reply to `/admin info`.
pub const ADMIN_INFO_REPLY: &str = r#"🤖 trigger-bot

• Хранилище: SurrealDB
• Фразы читаются из базы на каждое сообщение (без кэша)
• Отвечает только на одно совпадение
• ЕБ-детектор активен и считается как отдельное совпадение

Список команд: /admin help"#;

/// Reply to `/admin help` or a bare `/admin`.
pub const ADMIN_HELP_REPLY: &str = r#"🛠️ Команды администратора:

📝 Добавление и удаление:
/admin add <ключ> <значение> - Добавить или заменить запись
/admin remove <ключ> - Удалить запись

🔍 Поиск и просмотр:
/admin list - Первые 30 записей
/admin search <текст> - Поиск по значениям
/admin count - Количество записей

📁 Прочее:
/admin export - Все записи одним списком
/admin info - Информация о боте
/admin test - Проверить ЕБ-детектор
/admin help - Эта справка

Значение, начинающееся с STICKER:, отправляется как стикер плюс текст после префикса.

Примеры:
/admin add славик Славик абсолютно конченная поебота
/admin remove славик
/admin search спасибо"#;

/// Sample text used by `/admin test`.
pub const ADMIN_TEST_SAMPLE: &str = "Тест ЕБ функции";
