use serde::{Deserialize, Serialize};

/// A weapon entry in the catalog. Identity is the (unique) name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    /// Segment color on the wheel, as a CSS hex string.
    pub color: String,
    /// Flavor line shown under the weapon name.
    pub flavor: String,
    /// Icon file name, resolved by the presentation layer.
    pub icon: String,
}

impl Weapon {
    pub fn new(name: &str, color: &str, flavor: &str, icon: &str) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
            flavor: flavor.to_string(),
            icon: icon.to_string(),
        }
    }
}

/// The full built-in weapon catalog.
pub fn default_weapons() -> Vec<Weapon> {
    vec![
        Weapon::new("大剑", "#ef4444", "一击脱离，真男人从不回头看蓄力斩！", "大剑.png"),
        Weapon::new("太刀", "#f97316", "见切如风，登龙如画，帅是一辈子的事！", "太刀.png"),
        Weapon::new("片手剑", "#eab308", "最灵活的猎人，在怪物的脚边起舞！", "片手剑.png"),
        Weapon::new("双刀", "#84cc16", "鬼人化，乱舞！感受利刃的狂风吧！", "双刀.png"),
        Weapon::new("大锤", "#22c55e", "大地一击！没有什么是一锤子解决不了的！", "大锤.png"),
        Weapon::new("狩猎笛", "#14b8a6", "最摇摆的猎人，用音符带来胜利！", "狩猎笛.png"),
        Weapon::new("长枪", "#06b6d4", "不动如山，精准反击，最坚固的壁垒！", "长枪.png"),
        Weapon::new("铳枪", "#3b82f6", "龙杭炮预备！艺术就是爆炸！", "铳枪.png"),
        Weapon::new("斩斧", "#6366f1", "剑斧切换，零距离解放，华丽的变形武器！", "斩斧.png"),
        Weapon::new("盾斧", "#8b5cf6", "超解！将积攒的能量，一瞬间全部释放！", "盾斧.png"),
        Weapon::new("操虫棍", "#a855f7", "天空是你的领地，与猎虫一同飞舞吧！", "操虫棍.png"),
        Weapon::new("轻弩", "#d946ef", "速射与走位，战场上的游击专家！", "轻弩.png"),
        Weapon::new("重弩", "#ec4899", "蹲下，架起，让怪物感受金属风暴的洗礼！", "重弩.png"),
        Weapon::new("弓", "#f43f5e", "滑步蓄力，龙之箭，贯穿一切的优雅猎手！", "弓箭.png"),
    ]
}

/// The built-in challenge catalog. Challenges are opaque strings with
/// value equality and no further identity.
pub fn default_challenges() -> Vec<String> {
    [
        "不使用任何道具（回复药除外）",
        "不携带随从猫/犬",
        "禁止使用翔虫受身",
        "狩猎中途禁止返回营地",
        "禁止使用陷阱和异常状态道具",
        "全程不使用快速磨刀",
        "只允许使用替换技[朱]",
        "只允许使用替换技[苍]",
        "禁止骑乘任何怪物",
        "装备上至少一件“负技能”防具",
        "禁止使用环境生物",
        "禁止使用GP/看破斩等反击类招式",
        "只能使用初始装备进行狩猎",
        "穿上一套你最帅的幻化出击",
        "尝试一次“眠斩”或“眠爆”",
        "狩猎目标以外，再狩猎一只大型怪物",
        "只吃“随便什么”猫饭",
        "捕获而不是讨伐目标怪物",
        "讨伐而不是捕获目标怪物",
        "用一个帅气的姿势完成任务结算",
        "在狩猎前，先去吃一次兔兔团子",
        "找到任务地图里的一个隐藏彩蛋",
        "在怪物的“BGM”最激昂时完成讨伐",
        "给你的随从穿上最可爱的衣服",
        "在最高处使用动作‘飞吻’",
        "和地图里的环境生物合影",
        "破坏怪物的每一个可破坏部位",
        "尝试用环境生物对怪物造成伤害",
        "全程不让体力条低于50%",
        "只攻击怪物的弱点部位",
        "在10分钟内完成狩猎",
        "无伤完成一次怪物的“大招”处理",
        "全程不触发“毅力”或“猫的报酬术”",
        "不使用闪光弹或音爆弹",
        "完成一次“锁头”硬直",
        "全程不使用回家玉",
        "用异常状态攻击打出最后一击",
        "用捕获用麻醉球作为最后一击",
        "在怪物睡觉时，在它旁边放一个烤肉架",
        "狩猎开始后，先原地观察怪物1分钟再动手",
        "只使用投掷物（苦无、飞刀等）作为最后一击",
        "尝试用爆桶“炸飞”队友一次（开玩笑的喵！）",
        "在讨伐后，用光所有弹药/瓶子",
        "在怪物面前做一次“挑衅”动作并存活下来",
        "只吃一种颜色的团子",
        "在怪物换区时，比它先到下一个区",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}
