//! Platform payloads and typed response bodies

use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

pub const GROUP_ID: &str = "g-test";

/// A member record as the group page embeds it
pub fn remote_member(mid: &str, nickname: &str) -> Value {
    let now = Utc::now().timestamp();
    json!({
        "mid": mid,
        "mn": nickname,
        "i_m": "N",
        "j_t": now - 200 * 86_400,
        "v_t": now - 86_400,
        "ban": "N",
    })
}

/// Same record with the ban flag set
pub fn banned_member(mid: &str, nickname: &str) -> Value {
    let mut member = remote_member(mid, nickname);
    member["ban"] = json!("Y");
    member
}

/// Group page markup streaming the members inside a flight chunk
pub fn flight_page(members: &[Value]) -> String {
    let chunk = format!(
        "5:[\"$\",\"div\",null,{}]\n",
        json!({"group": {"gid": GROUP_ID, "members": members}})
    );
    let literal = serde_json::to_string(&chunk).unwrap_or_default();
    format!(
        "<!DOCTYPE html><html><body>\
         <script>(self.__next_f=self.__next_f||[]).push([0])</script>\
         <script>self.__next_f.push([1,{literal}])</script>\
         </body></html>"
    )
}

/// A join post carrying an introduction
pub fn join_post(author: &str, body: &str) -> Value {
    json!({
        "wid": author,
        "ot": Utc::now().timestamp() - 100 * 86_400,
        "at": "가입인사 드립니다",
        "c": body,
        "cat": "J",
    })
}

/// An ordinary board post
pub fn article(author: &str, title: &str) -> Value {
    json!({
        "wid": author,
        "ot": Utc::now().timestamp() - 10 * 86_400,
        "at": title,
        "c": "오늘 공부 인증합니다",
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    pub success: bool,
    pub inserted_count: usize,
    pub updated_count: usize,
    pub inserted_names: Vec<String>,
    pub remote_member_total: usize,
}

#[derive(Debug, Deserialize)]
pub struct SyncFailureResponse {
    pub success: bool,
    pub error: String,
    pub code: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberView {
    pub id: String,
    pub nickname: String,
    pub real_name: String,
    pub role: String,
    pub status: String,
    pub activity_status: String,
    pub leave_date: String,
    pub location: String,
    pub study_content: String,
    pub article_count: u32,
    pub intro_text: String,
    pub memo: String,
}

#[derive(Debug, Deserialize)]
pub struct MemberList {
    pub members: Vec<MemberView>,
}

impl MemberList {
    pub fn nicknames(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.nickname.as_str()).collect()
    }

    pub fn find(&self, nickname: &str) -> Option<&MemberView> {
        self.members.iter().find(|m| m.nickname == nickname)
    }
}

#[derive(Debug, Deserialize)]
pub struct MemberDetail {
    pub member: MemberView,
}

#[derive(Debug, Deserialize)]
pub struct Mutation {
    pub success: bool,
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogView {
    pub member_id: String,
    pub action: String,
    pub detail: String,
    pub operator_id: String,
}

#[derive(Debug, Deserialize)]
pub struct LogList {
    pub logs: Vec<LogView>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorView,
}

#[derive(Debug, Deserialize)]
pub struct ErrorView {
    pub code: String,
    pub message: String,
}
