// gateway/src/api/mod.rs
pub mod chats;
pub mod pages;
pub mod users;

pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    // `/user/chats` must be registered ahead of `/user/{id}`
    cfg.service(pages::home)
        .service(pages::my_chats)
        .service(pages::user_page)
        .service(pages::user_page_by_name)
        .service(users::create_user)
        .service(chats::send_chat_by_id)
        .service(chats::send_chat_by_name);
}
