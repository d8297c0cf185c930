use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use taskdeck::auth::{AuthMiddleware, SessionIssuer};
use taskdeck::config::Config;
use taskdeck::routes::{self, health};
use taskdeck::store::{AccountStore, TaskStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env().map_err(|e| {
        log::error!("invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;
    log::debug!("{:?}", config);

    if !config.enforce_auth {
        log::warn!("ENFORCE_AUTH is off: task routes accept requests without a valid bearer token");
    }

    let issuer = web::Data::new(SessionIssuer::new(&config.jwt_secret, config.token_ttl));
    let accounts = web::Data::new(AccountStore::new(config.bcrypt_cost));
    let tasks = web::Data::new(TaskStore::new());
    let enforce_auth = config.enforce_auth;

    log::info!("Starting taskdeck server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(issuer.clone())
            .app_data(accounts.clone())
            .app_data(tasks.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware::new(issuer.clone(), enforce_auth))
                    .configure(routes::config),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
