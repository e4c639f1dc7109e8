#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod schema;

#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod middleware;
#[cfg(feature = "server")]
pub mod pagination;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

#[cfg(feature = "server")]
mod server {
    use actix_cors::Cors;
    use actix_files::Files;
    use actix_identity::IdentityMiddleware;
    use actix_session::{SessionMiddleware, storage::CookieSessionStore};
    use actix_web::cookie::Key;
    use actix_web::{App, HttpServer, web};
    use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
    use tera::Tera;

    use crate::db::establish_connection_pool;
    use crate::middleware::RedirectUnauthorized;
    use crate::models::config::ServerConfig;
    use crate::repository::DieselRepository;
    use crate::routes::api::{api_v1_customers, api_v1_revenue};
    use crate::routes::appointments::{
        add_appointment, delete_appointment, save_appointment, show_appointments,
    };
    use crate::routes::customers::{
        add_customer, delete_customer, save_customer, show_customer, show_customers,
        upload_customers,
    };
    use crate::routes::jobs::{add_job, delete_job, save_job, show_job};
    use crate::routes::main::{logout, not_assigned, show_index};
    use crate::routes::reports::{export_report, show_reports};
    use crate::routes::settings::{save_company, show_settings, upload_logo};
    use crate::routes::technicians::{
        add_technician, delete_technician, save_technician, show_technicians,
    };
    use crate::routes::transactions::{add_transaction, delete_transaction, save_transaction};
    use crate::routes::vehicles::{add_vehicle, delete_vehicle, save_vehicle, show_vehicle};

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        // Establish Diesel connection pool for the SQLite database.
        let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
            std::io::Error::other(format!("Failed to establish database connection: {e}"))
        })?;

        let repo = DieselRepository::new(pool);

        // Keys and stores for identity, sessions, and flash messages.
        let secret_key = Key::from(server_config.secret.as_bytes());

        let message_store = CookieMessageStore::builder(secret_key.clone()).build();
        let message_framework = FlashMessagesFramework::builder(message_store).build();

        let tera = Tera::new(&server_config.templates_dir)
            .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

        let bind_address = (server_config.address.clone(), server_config.port);

        HttpServer::new(move || {
            App::new()
                .wrap(Cors::permissive())
                .wrap(message_framework.clone())
                .wrap(IdentityMiddleware::default())
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                        .cookie_secure(false) // set to true in prod
                        .cookie_domain(Some(format!(".{}", server_config.domain)))
                        .build(),
                )
                .wrap(actix_web::middleware::Compress::default())
                .wrap(actix_web::middleware::Logger::default())
                .service(Files::new("/assets", server_config.assets_dir.clone()))
                .service(Files::new("/uploads", server_config.upload_dir.clone()))
                .service(
                    web::scope("/api")
                        .service(api_v1_customers)
                        .service(api_v1_revenue),
                )
                .service(
                    web::scope("")
                        .wrap(RedirectUnauthorized)
                        .service(show_index)
                        .service(not_assigned)
                        .service(show_customers)
                        .service(show_customer)
                        .service(add_customer)
                        .service(upload_customers)
                        .service(save_customer)
                        .service(delete_customer)
                        .service(show_vehicle)
                        .service(add_vehicle)
                        .service(save_vehicle)
                        .service(delete_vehicle)
                        .service(show_appointments)
                        .service(add_appointment)
                        .service(save_appointment)
                        .service(delete_appointment)
                        .service(show_job)
                        .service(add_job)
                        .service(save_job)
                        .service(delete_job)
                        .service(add_transaction)
                        .service(save_transaction)
                        .service(delete_transaction)
                        .service(show_technicians)
                        .service(add_technician)
                        .service(save_technician)
                        .service(delete_technician)
                        .service(show_reports)
                        .service(export_report)
                        .service(show_settings)
                        .service(save_company)
                        .service(upload_logo)
                        .service(logout),
                )
                .app_data(web::Data::new(tera.clone()))
                .app_data(web::Data::new(repo.clone()))
                .app_data(web::Data::new(server_config.clone()))
        })
        .bind(bind_address)?
        .run()
        .await
    }
}

#[cfg(feature = "server")]
pub use server::run;
