use actix_web::web;

pub mod games;
pub mod health;
pub mod play;

/// All application routes. `main.rs` and the test app builder both use this.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::root));
    cfg.configure(health::configure_routes);
    cfg.service(web::scope("/games").configure(games::configure_routes));
    cfg.configure(play::configure_routes);
}
