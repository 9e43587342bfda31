//! User-facing strings, one entry per toast and dialog title.

use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Locale {
    #[default]
    En,
    #[value(name = "zh-cn")]
    ZhCn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Message {
    LoginFailed,
    LoginRequestFailed,
    LoadRulesFailed,
    Saved,
    SaveFailed,
    Deleted,
    DeleteFailed,
    LoadEventsFailed,
    StatsFailed,
    SessionStoreFailed,
    AddRuleTitle,
    EditRuleTitle,
}

impl Message {
    #[must_use]
    pub fn text(self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.english(),
            Locale::ZhCn => self.chinese(),
        }
    }

    fn english(self) -> &'static str {
        match self {
            Self::LoginFailed => "login failed",
            Self::LoginRequestFailed => "login request failed",
            Self::LoadRulesFailed => "failed to load authorization rules",
            Self::Saved => "saved",
            Self::SaveFailed => "save failed",
            Self::Deleted => "deleted",
            Self::DeleteFailed => "delete failed",
            Self::LoadEventsFailed => "failed to load events",
            Self::StatsFailed => "failed to generate report",
            Self::SessionStoreFailed => "failed to update saved session",
            Self::AddRuleTitle => "add rule",
            Self::EditRuleTitle => "edit rule",
        }
    }

    fn chinese(self) -> &'static str {
        match self {
            Self::LoginFailed => "登录失败",
            Self::LoginRequestFailed => "登录请求失败",
            Self::LoadRulesFailed => "加载授权规则失败",
            Self::Saved => "保存成功",
            Self::SaveFailed => "保存失败",
            Self::Deleted => "删除成功",
            Self::DeleteFailed => "删除失败",
            Self::LoadEventsFailed => "加载事件记录失败",
            Self::StatsFailed => "生成报表失败",
            Self::SessionStoreFailed => "保存登录状态失败",
            Self::AddRuleTitle => "添加授权规则",
            Self::EditRuleTitle => "编辑授权规则",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::En => "en",
            Self::ZhCn => "zh-cn",
        })
    }
}

#[cfg(test)]
#[path = "messages_test.rs"]
mod tests;
