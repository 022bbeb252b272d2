use crate::{
    api::{attendance, department, export, report, section, shift, user, worker},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    governor::middleware::NoOpMiddleware, Governor, GovernorConfigBuilder, PeerIpKeyExtractor,
};
use actix_web::{middleware::from_fn, web};

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let login_limiter = build_limiter(config.rate_login_per_min);
    let protected_limiter = build_limiter(config.rate_protected_per_min);

    // Public routes
    cfg.service(
        web::scope("/auth").service(
            web::resource("/login")
                .wrap(login_limiter)
                .route(web::post().to(handlers::login)),
        ),
    );

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware))
            .wrap(protected_limiter)
            .service(
                web::resource("/sections")
                    .route(web::get().to(section::list_sections))
                    .route(web::post().to(section::create_section))
                    .route(web::delete().to(section::clear_sections)),
            )
            .service(
                web::resource("/departments")
                    .route(web::get().to(department::list_departments))
                    .route(web::post().to(department::create_department))
                    .route(web::delete().to(department::clear_departments)),
            )
            .service(
                web::resource("/shifts")
                    .route(web::get().to(shift::list_shifts))
                    .route(web::post().to(shift::create_shift)),
            )
            .service(
                web::resource("/users")
                    .route(web::get().to(user::list_users))
                    .route(web::post().to(user::create_user)),
            )
            .service(
                web::scope("/workers")
                    .service(
                        web::resource("")
                            .route(web::get().to(worker::list_workers))
                            .route(web::post().to(worker::create_worker))
                            .route(web::delete().to(worker::clear_workers)),
                    )
                    .service(
                        web::resource("/import").route(web::post().to(worker::import_workers)),
                    )
                    .service(
                        web::resource("/{id}/active")
                            .route(web::put().to(worker::set_worker_active)),
                    )
                    .service(
                        web::resource("/{id}/transfer")
                            .route(web::put().to(worker::transfer_worker)),
                    )
                    .service(web::resource("/{id}").route(web::delete().to(worker::delete_worker))),
            )
            .service(
                web::scope("/attendance")
                    .service(
                        web::resource("")
                            .route(web::get().to(attendance::attendance_register))
                            .route(web::delete().to(attendance::clear_attendance)),
                    )
                    .service(
                        web::resource("/mark").route(web::post().to(attendance::mark_attendance)),
                    )
                    .service(
                        web::resource("/statuses")
                            .route(web::put().to(attendance::edit_statuses)),
                    ),
            )
            .service(
                web::scope("/reports")
                    .service(web::resource("/daily").route(web::get().to(report::daily_report)))
                    .service(web::resource("/monthly").route(web::get().to(report::monthly)))
                    .service(web::resource("/grid").route(web::get().to(report::grid))),
            )
            .service(
                web::scope("/export")
                    .service(
                        web::resource("/attendance")
                            .route(web::get().to(export::attendance_csv)),
                    )
                    .service(web::resource("/monthly").route(web::get().to(export::monthly_csv)))
                    .service(web::resource("/grid").route(web::get().to(export::grid_csv)))
                    .service(web::resource("/workers").route(web::get().to(export::workers_csv))),
            ),
    );
}
