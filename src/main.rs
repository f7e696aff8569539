#![feature(proc_macro_hygiene, decl_macro)]

#[macro_use]
extern crate rocket;
#[macro_use]
extern crate serde_json;

use diesel::r2d2::{ConnectionManager, Pool};
use dotenv::dotenv;
use folio_models::{db_conn::DbPool, Connection, Error, Result, CONFIG};
use rocket::config::{Config as RocketConfig, Environment};

mod api;

/// Initializes a database pool.
fn init_pool() -> Result<DbPool> {
    let manager = ConnectionManager::<Connection>::new(CONFIG.database_url.as_str());
    let mut builder = Pool::builder().min_idle(CONFIG.db_min_idle);
    if let Some(max_size) = CONFIG.db_max_size {
        builder = builder.max_size(max_size);
    }
    builder.build(manager).map_err(Error::from)
}

fn rocket_config() -> RocketConfig {
    RocketConfig::build(Environment::active().expect("Invalid ROCKET_ENV"))
        .address(CONFIG.address.clone())
        .port(CONFIG.port)
        .finalize()
        .expect("main: invalid rocket configuration")
}

fn main() {
    dotenv().ok();
    tracing_subscriber::fmt().init();

    let pool = init_pool().expect("main: database pool initialization error");
    tracing::info!("listening on {}:{}", CONFIG.address, CONFIG.port);

    rocket::custom(rocket_config())
        .manage(pool)
        .mount(
            "/",
            routes![
                api::index,
                api::users::create,
                api::users::list,
                api::users::get,
                api::users::update,
                api::users::delete,
                api::users::update_role,
                api::users::notifications,
                api::authors::create,
                api::authors::list,
                api::authors::get,
                api::authors::get_by_user,
                api::authors::promote,
                api::authors::update,
                api::authors::delete,
                api::authors::follow,
                api::authors::unfollow,
                api::authors::followers,
                api::posts::create,
                api::posts::list,
                api::posts::get,
                api::posts::list_by_author,
                api::posts::update,
                api::posts::delete,
                api::posts::create_comment,
                api::posts::comments,
                api::posts::react,
                api::posts::unreact,
                api::posts::reactions,
                api::posts::create_report,
                api::comments::get,
                api::comments::delete,
                api::reports::list,
                api::reports::get,
                api::reports::update,
                api::reports::delete,
                api::notifications::mark_read,
            ],
        )
        .register(catchers![
            api::errors::not_found,
            api::errors::unprocessable_entity,
            api::errors::server_error,
        ])
        .launch();
}
