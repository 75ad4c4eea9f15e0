use crate::api::employee;
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, api_prefix: &str) {
    cfg.service(
        web::scope(api_prefix)
            .app_data(web::JsonConfig::default().error_handler(|err, _req| employee::bad_request(err)))
            .app_data(web::PathConfig::default().error_handler(|err, _req| employee::bad_request(err)))
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::get().to(employee::list_employees))
                            .route(web::post().to(employee::add_employee)),
                    )
                    // fixed paths before /{employee_id}
                    .service(web::resource("/export").route(web::get().to(employee::export_employees)))
                    .service(web::resource("/summary").route(web::get().to(employee::employee_summary)))
                    // /employees/{employee_id}
                    .service(
                        web::resource("/{employee_id}")
                            .route(web::put().to(employee::update_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            ),
    );
}
