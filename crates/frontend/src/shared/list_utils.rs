/// Утилиты заголовков сортировки списков
use contracts::shared::list::SortOrder;

/// Индикатор сортировки для заголовка колонки
pub fn get_sort_indicator(current_field: Option<&str>, field: &str, order: SortOrder) -> &'static str {
    if current_field == Some(field) {
        match order {
            SortOrder::Asc => " ▲",
            SortOrder::Desc => " ▼",
        }
    } else {
        " ⇅"
    }
}

/// CSS класс индикатора: активная колонка подсвечивается
pub fn get_sort_class(current_field: Option<&str>, field: &str) -> &'static str {
    if current_field == Some(field) {
        "sort-icon active"
    } else {
        "sort-icon"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator(Some("code"), "code", SortOrder::Asc), " ▲");
        assert_eq!(get_sort_indicator(Some("code"), "code", SortOrder::Desc), " ▼");
        assert_eq!(get_sort_indicator(Some("name"), "code", SortOrder::Asc), " ⇅");
        assert_eq!(get_sort_indicator(None, "code", SortOrder::Desc), " ⇅");
    }

    #[test]
    fn test_sort_class() {
        assert_eq!(get_sort_class(Some("code"), "code"), "sort-icon active");
        assert_eq!(get_sort_class(None, "code"), "sort-icon");
    }
}
