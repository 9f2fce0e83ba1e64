use contracts::shared::list::{FilterMap, FilterValue};

/// Тип поля фильтра
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Text,
    Select,
    Date,
    Range,
    Boolean,
    Number,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Описание фильтра списочной формы
#[derive(Debug, Clone, PartialEq)]
pub struct FilterDescriptor {
    pub key: &'static str,
    pub kind: FilterKind,
    pub label: &'static str,
    pub options: Vec<FilterOption>,
    pub default: Option<FilterValue>,
}

impl FilterDescriptor {
    pub fn new(key: &'static str, kind: FilterKind, label: &'static str) -> Self {
        Self {
            key,
            kind,
            label,
            options: Vec::new(),
            default: None,
        }
    }

    pub fn text(key: &'static str, label: &'static str) -> Self {
        Self::new(key, FilterKind::Text, label)
    }

    pub fn select(key: &'static str, label: &'static str, options: Vec<FilterOption>) -> Self {
        Self {
            options,
            ..Self::new(key, FilterKind::Select, label)
        }
    }

    pub fn with_default(mut self, value: FilterValue) -> Self {
        self.default = Some(value);
        self
    }

    /// Разбор значения из поля ввода. Пустой ввод означает "сбросить".
    pub fn parse_input(&self, raw: &str) -> Option<FilterValue> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match self.kind {
            FilterKind::Text | FilterKind::Select | FilterKind::Date => {
                Some(FilterValue::text(raw))
            }
            FilterKind::Number => raw.replace(',', ".").parse::<f64>().ok().map(FilterValue::Number),
            FilterKind::Boolean => match raw {
                "true" | "1" | "yes" => Some(FilterValue::Bool(true)),
                "false" | "0" | "no" => Some(FilterValue::Bool(false)),
                _ => None,
            },
            FilterKind::Range => Some(FilterValue::range(Some(raw.to_string()), None)),
        }
    }

    /// Подпись значения; для select берётся label опции
    pub fn display_value(&self, value: &FilterValue) -> String {
        if let (FilterKind::Select, FilterValue::Text(v)) = (self.kind, value) {
            if let Some(option) = self.options.iter().find(|o| &o.value == v) {
                return option.label.clone();
            }
        }
        value.display()
    }
}

/// Начальные значения фильтров из описаний
pub fn default_filters(descriptors: &[FilterDescriptor]) -> FilterMap {
    descriptors
        .iter()
        .filter_map(|d| d.default.clone().map(|v| (d.key.to_string(), v)))
        .filter(|(_, v)| !v.is_empty())
        .collect()
}

/// Текстовый поиск применяется с минимальной длины; пустой ввод сбрасывает
pub fn accepts_text_input(raw: &str, min_chars: usize) -> bool {
    let len = raw.trim().chars().count();
    len == 0 || len >= min_chars
}

/// Значение фильтра в виде строки для поля ввода
pub fn raw_input_value(value: Option<&FilterValue>) -> String {
    match value {
        Some(FilterValue::Text(s)) => s.clone(),
        Some(FilterValue::Bool(b)) => b.to_string(),
        Some(FilterValue::Number(n)) => n.to_string(),
        Some(FilterValue::Range { .. }) | None => String::new(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
    From,
    To,
}

/// Границы диапазона для полей ввода
pub fn range_bounds(value: Option<&FilterValue>) -> (String, String) {
    match value {
        Some(FilterValue::Range { from, to }) => (
            from.clone().unwrap_or_default(),
            to.clone().unwrap_or_default(),
        ),
        _ => (String::new(), String::new()),
    }
}

/// Меняет одну границу диапазона, сохраняя вторую
pub fn update_range(current: Option<&FilterValue>, bound: RangeBound, raw: &str) -> Option<FilterValue> {
    let (from, to) = range_bounds(current);
    let raw = raw.trim().to_string();
    let (from, to) = match bound {
        RangeBound::From => (raw, to),
        RangeBound::To => (from, raw),
    };
    let non_empty = |s: String| if s.is_empty() { None } else { Some(s) };
    let value = FilterValue::range(non_empty(from), non_empty(to));
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input_by_kind() {
        let number = FilterDescriptor::new("price", FilterKind::Number, "Цена");
        assert_eq!(number.parse_input("12,5"), Some(FilterValue::Number(12.5)));
        assert_eq!(number.parse_input("abc"), None);
        assert_eq!(number.parse_input("  "), None);

        let flag = FilterDescriptor::new("is_active", FilterKind::Boolean, "Активен");
        assert_eq!(flag.parse_input("true"), Some(FilterValue::Bool(true)));

        let text = FilterDescriptor::text("q", "Поиск");
        assert_eq!(text.parse_input(" кофе "), Some(FilterValue::text("кофе")));
    }

    #[test]
    fn test_select_display_uses_option_label() {
        let status = FilterDescriptor::select(
            "status",
            "Статус",
            vec![FilterOption::new("posted", "Проведён")],
        );
        assert_eq!(status.display_value(&FilterValue::text("posted")), "Проведён");
        assert_eq!(status.display_value(&FilterValue::text("draft")), "draft");
    }

    #[test]
    fn test_default_filters() {
        let descriptors = vec![
            FilterDescriptor::text("q", "Поиск"),
            FilterDescriptor::new("is_active", FilterKind::Boolean, "Активен")
                .with_default(FilterValue::Bool(true)),
        ];
        let defaults = default_filters(&descriptors);
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults.get("is_active"), Some(&FilterValue::Bool(true)));
    }

    #[test]
    fn test_accepts_text_input() {
        assert!(accepts_text_input("", 3));
        assert!(!accepts_text_input("ко", 3));
        assert!(accepts_text_input("коф", 3));
    }

    #[test]
    fn test_update_range_keeps_other_bound() {
        let value = update_range(None, RangeBound::From, "2024-01-01");
        assert_eq!(
            value,
            Some(FilterValue::range(Some("2024-01-01".to_string()), None))
        );
        let value = update_range(value.as_ref(), RangeBound::To, "2024-01-31");
        assert_eq!(
            range_bounds(value.as_ref()),
            ("2024-01-01".to_string(), "2024-01-31".to_string())
        );
        let value = update_range(value.as_ref(), RangeBound::From, "");
        let value = update_range(value.as_ref(), RangeBound::To, " ");
        assert_eq!(value, None);
    }

    #[test]
    fn test_raw_input_value() {
        assert_eq!(raw_input_value(Some(&FilterValue::Bool(false))), "false");
        assert_eq!(raw_input_value(Some(&FilterValue::text("x"))), "x");
        assert_eq!(raw_input_value(None), "");
    }
}
