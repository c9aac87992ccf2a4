use serde_json::Value as JsonValue;

use tokio_postgres::Row;

use crate::error::*;
use crate::forms::CreatePost;
use crate::models::*;

use crate::db::*;

#[derive(Clone)]
pub struct PostService {
  // get one post
  post_by_id: VersionedStatement,

  // get the feed
  posts_all: VersionedStatement,

  // create / update / delete
  insert_post: VersionedStatement,
  update_text: VersionedStatement,
  delete_post: VersionedStatement,

  // persist embedded lists
  save_likes: VersionedStatement,
  save_comments: VersionedStatement,
}

static POST_DETAILS_SELECT: &'static str = r#"
SELECT p.id, p.text, p.name, p.avatar, p.likes, p.comments,
  p.created_at, p.updated_at,
  u.id, u.username, u.fullname, u.email, u.avatar
FROM posts p INNER JOIN users u ON p.user_id = u.id
"#;

fn post_details_from_row(row: &Row) -> Result<PostDetails> {
  let likes: JsonValue = row.get(4);
  let comments: JsonValue = row.get(5);

  Ok(PostDetails {
    id: row.get(0),
    text: row.get(1),
    name: row.get(2),
    avatar: row.get(3),
    likes: serde_json::from_value(likes)?,
    comments: serde_json::from_value(comments)?,
    created_at: row.get(6),
    updated_at: row.get(7),
    user: UserPublic {
      id: row.get(8),
      username: row.get(9),
      fullname: row.get(10),
      email: row.get(11),
      avatar: row.get(12),
    },
  })
}

fn post_details_from_opt_row(row: &Option<Row>) -> Result<Option<PostDetails>> {
  match row {
    Some(ref row) => Ok(Some(post_details_from_row(row)?)),
    None => Ok(None),
  }
}

impl PostService {
  pub fn new(cl: SharedClient) -> Result<PostService> {
    let post_by_id = VersionedStatement::new(cl.clone(),
        &format!(r#"{} WHERE p.id = $1"#, POST_DETAILS_SELECT))?;

    // Newest first.
    let posts_all = VersionedStatement::new(cl.clone(),
        &format!(r#"{} ORDER BY p.id DESC"#, POST_DETAILS_SELECT))?;

    // likes/comments start as empty lists (schema default).
    let insert_post = VersionedStatement::new(cl.clone(),
        r#"INSERT INTO posts(user_id, text, name, avatar)
        VALUES($1, $2, $3, $4) RETURNING id"#)?;

    let update_text = VersionedStatement::new(cl.clone(),
        r#"UPDATE posts SET text = $2, updated_at = now() WHERE id = $1"#)?;

    let delete_post = VersionedStatement::new(cl.clone(),
        r#"DELETE FROM posts WHERE id = $1"#)?;

    let save_likes = VersionedStatement::new(cl.clone(),
        r#"UPDATE posts SET likes = $2 WHERE id = $1"#)?;
    let save_comments = VersionedStatement::new(cl.clone(),
        r#"UPDATE posts SET comments = $2 WHERE id = $1"#)?;

    Ok(PostService {
      post_by_id,

      posts_all,

      insert_post,
      update_text,
      delete_post,

      save_likes,
      save_comments,
    })
  }

  pub async fn prepare(&self) -> Result<()> {
    self.post_by_id.prepare().await?;

    self.posts_all.prepare().await?;

    self.insert_post.prepare().await?;
    self.update_text.prepare().await?;
    self.delete_post.prepare().await?;

    self.save_likes.prepare().await?;
    self.save_comments.prepare().await?;
    Ok(())
  }

  pub async fn get_by_id(&self, post_id: i32) -> Result<Option<PostDetails>> {
    let row = self.post_by_id.query_opt(&[&post_id]).await?;
    post_details_from_opt_row(&row)
  }

  pub async fn get_all(&self) -> Result<Vec<PostDetails>> {
    let rows = self.posts_all.query(&[]).await?;
    rows.iter().map(post_details_from_row).collect()
  }

  pub async fn insert(&self, user_id: i32, post: &CreatePost) -> Result<Option<i32>> {
    Ok(self.insert_post.query_opt(&[
        &user_id, &post.text, &post.name, &post.avatar,
      ]).await?.map(|row| row.get(0))
    )
  }

  pub async fn update_text(&self, post_id: i32, text: &str) -> Result<u64> {
    Ok(self.update_text.execute(&[&post_id, &text]).await?)
  }

  pub async fn delete(&self, post_id: i32) -> Result<u64> {
    Ok(self.delete_post.execute(&[&post_id]).await?)
  }

  pub async fn save_likes(&self, post_id: i32, likes: &[Like]) -> Result<u64> {
    let likes = serde_json::to_value(likes)?;
    Ok(self.save_likes.execute(&[&post_id, &likes]).await?)
  }

  pub async fn save_comments(&self, post_id: i32, comments: &[CommentEntry]) -> Result<u64> {
    let comments = serde_json::to_value(comments)?;
    Ok(self.save_comments.execute(&[&post_id, &comments]).await?)
  }
}
