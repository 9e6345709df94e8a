use tabled::{settings::Style, Table, Tabled};

use crate::dog::Dog;

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Tabled)]
pub struct DogRow {
    #[tabled(rename = "Id")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Color")]
    pub color: String,
    #[tabled(rename = "Breed")]
    pub breed: String,
    #[tabled(rename = "Instagram")]
    pub instagram: String,
}

impl From<&Dog> for DogRow {
    fn from(dog: &Dog) -> Self {
        Self {
            id: dog.id().map(|id| id.to_string()).unwrap_or_default(),
            name: dog.name.clone(),
            color: dog.color.clone().unwrap_or_default(),
            breed: dog.breed.clone(),
            instagram: dog.instagram.clone().unwrap_or_default(),
        }
    }
}

#[derive(Default)]
pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

pub fn stats_table(stats: &[(&str, &str)]) -> String {
    let mut builder = TableBuilder::new();
    for (label, value) in stats {
        builder.add_row(label, value);
    }
    builder.build()
}

pub fn dog_table(dogs: &[Dog]) -> String {
    if dogs.is_empty() {
        return String::new();
    }
    let rows: Vec<DogRow> = dogs.iter().map(DogRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tables_render_nothing() {
        assert!(TableBuilder::new().build().is_empty());
        assert!(dog_table(&[]).is_empty());
    }

    #[test]
    fn test_dog_table_contains_fields() {
        let dogs = vec![Dog::new("Teddy", "cockapoo").with_instagram("@teddy")];
        let rendered = dog_table(&dogs);
        assert!(rendered.contains("Teddy"));
        assert!(rendered.contains("cockapoo"));
        assert!(rendered.contains("@teddy"));
        assert!(rendered.contains("Breed"));
    }

    #[test]
    fn test_stats_table() {
        let rendered = stats_table(&[("Dogs", "2"), ("Schema", "full")]);
        assert!(rendered.contains("Metric"));
        assert!(rendered.contains("Schema"));
        assert!(rendered.contains("full"));
    }
}
