pub mod util;

mod client;
pub use client::*;

mod user;
mod profile;
mod post;
pub use self::{
  user::*,
  profile::*,
  post::*,
};

use log::*;

use crate::error::*;

/// One handle per worker holding every per-entity statement set.  Built
/// explicitly at startup and passed through actix data; nothing in the
/// crate reaches for an ambient connection.
#[derive(Clone)]
pub struct DbService {
  pub shared_cl: SharedClient,
  pub user: UserService,
  pub profile: ProfileService,
  pub post: PostService,
}

impl DbService {
  pub fn new(db_url: &str) -> Result<DbService> {
    let shared_cl = SharedClient::new(db_url);

    Ok(DbService {
      user: UserService::new(shared_cl.clone())?,
      profile: ProfileService::new(shared_cl.clone())?,
      post: PostService::new(shared_cl.clone())?,
      shared_cl,
    })
  }

  pub async fn prepare(&self) -> Result<()> {
    info!("DbService: Prepare UserService.");
    self.user.prepare().await?;
    info!("DbService: Prepare ProfileService.");
    self.profile.prepare().await?;
    info!("DbService: Prepare PostService.");
    self.post.prepare().await?;

    info!("DbService: finished.");
    Ok(())
  }
}
