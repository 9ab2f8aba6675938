mod desc;
mod dispatch;
