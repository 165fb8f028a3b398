use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use quorum_server::{
    app_state::AppState,
    auth::AuthMiddleware,
    config::Config,
    handlers::{
        auth_handler, company_action_handler, company_handler, health_handler,
        quiz_attempt_handler, quiz_handler, user_handler,
    },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        config.validate_for_production();
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = AppState::new(config)
        .await
        .expect("failed to initialize application state");
    let jwt_service = state.jwt_service.clone();

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::from(jwt_service.clone()))
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .service(health_handler::health)
            .service(auth_handler::signup)
            .service(auth_handler::login)
            .service(auth_handler::refresh_token)
            .service(
                web::scope("")
                    .wrap(AuthMiddleware)
                    .service(auth_handler::me)
                    .service(user_handler::list_users)
                    .service(user_handler::get_user)
                    .service(user_handler::update_user)
                    .service(user_handler::delete_user)
                    .service(company_handler::list_companies)
                    .service(company_handler::create_company)
                    .service(company_handler::get_company)
                    .service(company_handler::update_company)
                    .service(company_handler::delete_company)
                    .service(company_action_handler::send_invitation)
                    .service(company_action_handler::accept_invitation)
                    .service(company_action_handler::reject_invitation)
                    .service(company_action_handler::cancel_invitation)
                    .service(company_action_handler::send_request)
                    .service(company_action_handler::accept_request)
                    .service(company_action_handler::reject_request)
                    .service(company_action_handler::cancel_request)
                    .service(company_action_handler::remove_user)
                    .service(company_action_handler::leave_company)
                    .service(company_action_handler::add_admin)
                    .service(company_action_handler::remove_admin)
                    .service(company_action_handler::my_requests)
                    .service(company_action_handler::my_invitations)
                    .service(company_action_handler::owner_invitations)
                    .service(company_action_handler::requests_in_company)
                    .service(company_action_handler::users_in_company)
                    .service(company_action_handler::admins_in_company)
                    .service(quiz_handler::list_quizzes)
                    .service(quiz_handler::list_company_quizzes)
                    .service(quiz_handler::create_quiz)
                    .service(quiz_handler::get_quiz)
                    .service(quiz_handler::update_quiz)
                    .service(quiz_handler::delete_quiz)
                    .service(quiz_handler::create_question)
                    .service(quiz_handler::update_question)
                    .service(quiz_handler::delete_question)
                    .service(quiz_handler::create_answers)
                    .service(quiz_handler::update_answer)
                    .service(quiz_handler::delete_answer)
                    .service(quiz_attempt_handler::take_quiz)
                    .service(quiz_attempt_handler::company_rating)
                    .service(quiz_attempt_handler::system_rating),
            )
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
