use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter};
use utoipa::ToSchema;

pub const TABLE: &str = "employees_codon";

/// Column names as they exist in the employees table, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, AsRefStr)]
pub enum Column {
    #[strum(serialize = "id")]
    Id,
    #[strum(serialize = "Nom")]
    Name,
    #[strum(serialize = "Email")]
    Email,
    #[strum(serialize = "Téléphone")]
    Phone,
    #[strum(serialize = "Département")]
    Department,
    #[strum(serialize = "Poste")]
    Role,
    #[strum(serialize = "Salaire")]
    Salary,
    #[strum(serialize = "Pays")]
    Country,
}

impl Column {
    pub fn quoted(self) -> String {
        format!("`{}`", self.as_ref())
    }

    /// Every column except the database-assigned id.
    pub fn writable() -> impl Iterator<Item = Column> {
        Column::iter().filter(|c| *c != Column::Id)
    }

    /// Select expression for this column. Salary is widened to DOUBLE so an
    /// INT or DECIMAL `Salaire` still decodes into `f64`.
    pub fn select_expr(self) -> String {
        match self {
            Column::Salary => format!("CAST({} AS DOUBLE) AS {}", self.quoted(), self.quoted()),
            _ => self.quoted(),
        }
    }

    pub fn select_list() -> String {
        Column::iter()
            .map(Column::select_expr)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "name": "Paul Engone",
        "email": "paul@x.com",
        "phone": "+24160000000",
        "department": "IT",
        "role": "Developer",
        "salary": 500000.0,
        "country": "Gabon"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: i64,

    #[sqlx(rename = "Nom")]
    pub name: String,

    #[sqlx(rename = "Email")]
    pub email: String,

    #[sqlx(rename = "Téléphone")]
    pub phone: String,

    #[sqlx(rename = "Département")]
    pub department: String,

    #[sqlx(rename = "Poste")]
    pub role: String,

    #[sqlx(rename = "Salaire")]
    pub salary: f64,

    #[sqlx(rename = "Pays")]
    pub country: String,
}

impl Employee {
    #[cfg(test)]
    pub fn from_input(id: i64, input: &EmployeeInput) -> Self {
        Self {
            id,
            name: input.name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            department: input.department.clone(),
            role: input.role.clone(),
            salary: input.salary,
            country: input.country.clone(),
        }
    }

    /// Field values in [`Column`] order, as text.
    pub fn to_record(&self) -> [String; 8] {
        [
            self.id.to_string(),
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.department.clone(),
            self.role.clone(),
            self.salary.to_string(),
            self.country.clone(),
        ]
    }
}

/// Payload shared by add and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmployeeInput {
    #[schema(example = "Paul Engone")]
    pub name: String,
    #[schema(example = "paul@x.com", format = "email")]
    pub email: String,
    #[schema(example = "+241 60 00 00 00")]
    pub phone: String,
    #[schema(example = "IT")]
    pub department: String,
    #[schema(example = "Developer")]
    pub role: String,
    #[schema(example = 500000.0)]
    pub salary: f64,
    #[schema(example = "Gabon")]
    pub country: String,
}
