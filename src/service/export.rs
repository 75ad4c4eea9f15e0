use strum::IntoEnumIterator;

use crate::model::employee::{Column, Employee};

pub const EXPORT_FILE_NAME: &str = "employes_export.csv";

/// Full-table CSV: a header row with the table's column names, then one
/// record per employee. UTF-8, no filtering.
pub fn write_csv(employees: &[Employee]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(Column::iter().map(|c| c.as_ref().to_string()))?;
    for employee in employees {
        writer.write_record(employee.to_record())?;
    }

    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_only_for_empty_table() {
        let bytes = write_csv(&[]).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "id,Nom,Email,Téléphone,Département,Poste,Salaire,Pays\n"
        );
    }

    #[test]
    fn rows_are_quoted_when_needed() {
        let employee = Employee {
            id: 3,
            name: "Engone, Paul".to_string(),
            email: "paul@x.com".to_string(),
            phone: "+241 60 00 00 00".to_string(),
            department: "IT".to_string(),
            role: "Developer".to_string(),
            salary: 500_000.0,
            country: "Gabon".to_string(),
        };

        let text = String::from_utf8(write_csv(&[employee]).unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "3,\"Engone, Paul\",paul@x.com,+241 60 00 00 00,IT,Developer,500000,Gabon"
        );
    }
}
