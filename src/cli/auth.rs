//! Login, account creation and logout against the auth API

use super::Context;
use crate::api::{AuthClient, Session, SessionStore, UserCreateRequest};
use crate::error::LanaResult;

fn client(ctx: &Context, api_url: Option<&str>) -> LanaResult<AuthClient> {
    AuthClient::new(api_url.unwrap_or(&ctx.settings.app.api_base_url))
}

pub fn handle_login(
    ctx: &Context,
    email: &str,
    password: &str,
    api_url: Option<&str>,
) -> LanaResult<()> {
    let response = client(ctx, api_url)?.login(email, password)?;
    let name = response.user.nombre_usuario.clone();

    SessionStore::new(ctx.paths.session_file()).save(&Session::from(response))?;
    println!("¡Bienvenido de vuelta, {}!", name);
    Ok(())
}

pub fn handle_register(
    ctx: &Context,
    request: &UserCreateRequest,
    api_url: Option<&str>,
) -> LanaResult<()> {
    let user = client(ctx, api_url)?.register(request)?;
    println!("Cuenta creada para {} ({})", user.nombre_usuario, user.email);
    Ok(())
}

pub fn handle_logout(ctx: &Context) -> LanaResult<()> {
    if SessionStore::new(ctx.paths.session_file()).clear()? {
        println!("Sesión cerrada.");
    } else {
        println!("No hay sesión activa.");
    }
    Ok(())
}
