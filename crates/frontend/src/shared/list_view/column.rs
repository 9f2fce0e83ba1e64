use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

type CellRenderer<T> = Arc<dyn Fn(&T, &Value) -> String + Send + Sync>;

/// Описание колонки таблицы списка
///
/// Значение ячейки читается из сериализованного элемента по `key`
/// (поддерживается вложенность через точку: `base.code`).
pub struct Column<T> {
    pub key: &'static str,
    pub header: &'static str,
    pub min_width: f64,
    pub sortable: bool,
    render: Option<CellRenderer<T>>,
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            header: self.header,
            min_width: self.min_width,
            sortable: self.sortable,
            render: self.render.clone(),
        }
    }
}

impl<T: Serialize> Column<T> {
    pub fn new(key: &'static str, header: &'static str) -> Self {
        Self {
            key,
            header,
            min_width: 100.0,
            sortable: false,
            render: None,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn min_width(mut self, width: f64) -> Self {
        self.min_width = width;
        self
    }

    /// Собственный рендер ячейки: (элемент, сырое значение) -> текст
    pub fn render(mut self, render: impl Fn(&T, &Value) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(render));
        self
    }

    pub fn raw_value(&self, item: &T) -> Value {
        let json = match serde_json::to_value(item) {
            Ok(v) => v,
            Err(e) => {
                log::warn!(target: "list_view", "Column '{}': failed to serialize row: {}", self.key, e);
                return Value::Null;
            }
        };
        self.key
            .split('.')
            .try_fold(&json, |value, part| value.get(part))
            .cloned()
            .unwrap_or(Value::Null)
    }

    pub fn cell_text(&self, item: &T) -> String {
        let raw = self.raw_value(item);
        match &self.render {
            Some(render) => render(item, &raw),
            None => default_text(&raw),
        }
    }
}

fn default_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "Да".to_string(),
        Value::Bool(false) => "Нет".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Row {
        code: String,
        price: f64,
        active: bool,
        nested: Nested,
        comment: Option<String>,
    }

    #[derive(Serialize)]
    struct Nested {
        name: String,
    }

    fn row() -> Row {
        Row {
            code: "P-001".to_string(),
            price: 12.5,
            active: true,
            nested: Nested {
                name: "Кофе".to_string(),
            },
            comment: None,
        }
    }

    #[test]
    fn test_default_cell_text() {
        assert_eq!(Column::<Row>::new("code", "Код").cell_text(&row()), "P-001");
        assert_eq!(Column::<Row>::new("price", "Цена").cell_text(&row()), "12.5");
        assert_eq!(Column::<Row>::new("active", "Активен").cell_text(&row()), "Да");
        assert_eq!(Column::<Row>::new("nested.name", "Имя").cell_text(&row()), "Кофе");
        assert_eq!(Column::<Row>::new("comment", "Комментарий").cell_text(&row()), "");
        assert_eq!(Column::<Row>::new("missing", "?").cell_text(&row()), "");
    }

    #[test]
    fn test_custom_render_receives_raw_value() {
        let column = Column::<Row>::new("price", "Цена")
            .render(|item, raw| format!("{} {:.2}", item.code, raw.as_f64().unwrap_or_default()));
        assert_eq!(column.cell_text(&row()), "P-001 12.50");
    }
}
