//! The fixed category catalog and per-category counts.

use serde::Serialize;

use crate::core::skill::Skill;

/// Label given to skills whose category cannot be derived.
pub const DEFAULT_CATEGORY: &str = "其他";

/// A known catalog category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub key: &'static str,
    pub label: &'static str,
    pub hint: &'static str,
}

/// Known categories in display order. Labels are the exact values skills carry.
pub const CATEGORIES: [Category; 15] = [
    Category { key: "info", label: "信息获取与检索", hint: "搜索、抓取、文档解析、知识库检索" },
    Category { key: "planning", label: "规划与推理", hint: "任务拆解、路线选择、风险预案" },
    Category { key: "system", label: "工具与系统操作", hint: "CLI/脚本、API 调用、环境搭建" },
    Category { key: "engineering", label: "代码与工程化", hint: "重构、测试、构建与发布、CI/CD" },
    Category { key: "content", label: "内容与沟通", hint: "写作、总结、翻译、提案" },
    Category { key: "data", label: "数据处理与分析", hint: "清洗、统计、可视化、ETL" },
    Category { key: "workflow", label: "业务流程与自动化", hint: "RPA、流程编排、跨系统协同" },
    Category { key: "ops", label: "监控与运维", hint: "告警处理、故障排查、回滚恢复" },
    Category { key: "quality", label: "评估与质量", hint: "校验、审查、合规检查" },
    Category { key: "media", label: "多模态/媒体处理", hint: "图片、音视频、OCR、TTS" },
    Category { key: "security", label: "安全与合规", hint: "权限、脱敏、风控、审计" },
    Category { key: "integration", label: "集成与连接器", hint: "第三方 SaaS、Webhook、SDK/插件" },
    Category { key: "benchmark", label: "评测与基准", hint: "A/B、benchmark、回归测试" },
    Category { key: "domain", label: "领域专用", hint: "法务/医疗/金融、教育、人力" },
    Category { key: "other", label: DEFAULT_CATEGORY, hint: "未分类/探索中" },
];

/// Look up a category by key (`"data"`) or label (`"数据处理与分析"`).
#[must_use]
pub fn find_category(key_or_label: &str) -> Option<&'static Category> {
    CATEGORIES
        .iter()
        .find(|category| category.key == key_or_label || category.label == key_or_label)
}

/// Count of skills carrying one category label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    #[serde(flatten)]
    pub category: Category,
    pub count: usize,
}

/// One entry per known category, in catalog order, zero counts included.
///
/// Skills whose label is not in the catalog are not reported.
#[must_use]
pub fn category_counts(skills: &[Skill]) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = CATEGORIES
        .iter()
        .map(|category| CategoryCount {
            category: *category,
            count: 0,
        })
        .collect();

    for skill in skills {
        let label = if skill.category.is_empty() {
            DEFAULT_CATEGORY
        } else {
            skill.category.as_str()
        };
        if let Some(entry) = counts.iter_mut().find(|entry| entry.category.label == label) {
            entry.count += 1;
        }
    }

    counts
}
