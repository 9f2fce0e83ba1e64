use uuid::Uuid;

/// Минимальная форма элемента списка: строковый идентификатор
///
/// Списки, выбор строк, удаление и выгрузка работают только через него.
pub trait Identified {
    fn id(&self) -> String;
}

impl Identified for Uuid {
    fn id(&self) -> String {
        self.to_string()
    }
}

impl Identified for String {
    fn id(&self) -> String {
        self.clone()
    }
}
