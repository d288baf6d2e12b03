use super::config::Language;

/// Internationalization support for UI text
pub struct I18n {
    language: Language,
}

impl I18n {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        match self.language {
            Language::English => english(key),
            Language::Korean => korean(key).unwrap_or_else(|| english(key)),
        }
    }
}

fn english(key: &str) -> &str {
    match key {
        "app.title" => "Todo",

        // Item list
        "list.title" => "Items",
        "list.empty" => "Nothing to do yet.",
        "list.empty_hint" => "Press a to add your first todo",
        "list.completed" => "completed",

        // Add dialog
        "dialog.title" => "Add Todo",
        "dialog.label" => "Todo",
        "dialog.error" => "Todo cannot be empty",
        "dialog.clear" => "Ctrl+U clear",
        "dialog.cancel" => "Cancel",
        "dialog.save" => "Save",

        // Controls
        "controls.add" => "add",
        "controls.toggle" => "toggle",
        "controls.toggle_matching" => "toggle all equal items",
        "controls.navigation" => "move",
        "controls.theme" => "Theme:",
        "controls.help" => "help",
        "controls.quit" => "quit",

        // Help overlay
        "help.title" => "Keyboard Shortcuts",
        "help.list" => "List",
        "help.dialog" => "Add dialog",
        "help.close" => "Press ? or Esc to close",

        // Status messages
        "status.added" => "Added",
        "status.done" => "Marked done:",
        "status.undone" => "Marked not done:",
        "status.toggled_matching" => "Toggled every",
        "status.theme" => "Changed theme to",

        _ => key, // Fallback to key if not found
    }
}

fn korean(key: &str) -> Option<&'static str> {
    let text = match key {
        "app.title" => "할 일",
        "list.title" => "목록",
        "list.empty" => "아직 할 일이 없습니다.",
        "list.empty_hint" => "a 키를 눌러 첫 할 일을 추가하세요",
        "list.completed" => "완료",
        "dialog.title" => "할 일 추가",
        "dialog.label" => "할 일",
        "dialog.error" => "할 일을 입력하세요",
        "dialog.clear" => "Ctrl+U 지우기",
        "dialog.cancel" => "취소",
        "dialog.save" => "저장",
        "controls.add" => "추가",
        "controls.toggle" => "완료 전환",
        "controls.toggle_matching" => "같은 항목 모두 전환",
        "controls.navigation" => "이동",
        "controls.theme" => "테마:",
        "controls.help" => "도움말",
        "controls.quit" => "종료",
        "help.title" => "단축키",
        "help.list" => "목록",
        "help.dialog" => "추가 대화상자",
        "help.close" => "? 또는 Esc로 닫기",
        "status.added" => "추가됨",
        "status.done" => "완료:",
        "status.undone" => "미완료:",
        "status.toggled_matching" => "모두 전환:",
        "status.theme" => "테마 변경:",
        _ => return None,
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_lookup() {
        let i18n = I18n::new(Language::English);
        assert_eq!(i18n.t("dialog.error"), "Todo cannot be empty");
        assert_eq!(i18n.t("dialog.save"), "Save");
    }

    #[test]
    fn test_korean_lookup() {
        let i18n = I18n::new(Language::Korean);
        assert_eq!(i18n.t("dialog.save"), "저장");
    }

    #[test]
    fn test_unknown_key_falls_back_to_key() {
        assert_eq!(I18n::new(Language::English).t("no.such.key"), "no.such.key");
        assert_eq!(I18n::new(Language::Korean).t("no.such.key"), "no.such.key");
    }
}
