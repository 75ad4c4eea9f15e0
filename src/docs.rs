use crate::model::employee::{Employee, EmployeeInput};
use crate::model::summary::{GroupStats, Summary};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Staffdesk API",
        version = "0.1.0",
        description = r#"
## Employee records

Create, update, delete and list the employee table, download it as CSV, and
read the aggregates behind the dashboard charts.

### Response Format
Write operations answer with an envelope:
- `{"success": true, "message": "..."}`
- `{"success": false, "errors": ["...", "..."]}`

Validation failures list every violated rule at once. Reads are cached for
a short window and refreshed after every successful write.
"#,
    ),
    paths(
        crate::api::employee::list_employees,
        crate::api::employee::add_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,
        crate::api::employee::export_employees,
        crate::api::employee::employee_summary
    ),
    components(
        schemas(
            Employee,
            EmployeeInput,
            GroupStats,
            Summary
        )
    ),
    tags(
        (name = "Employee", description = "Employee record APIs"),
    )
)]
pub struct ApiDoc;
