//! Static concept, industry and strategy tables.
//!
//! Tables are ordered slices: label order is part of the observable contract
//! (classification results and tie-breaks follow it).

/// An ordered `label -> keywords` table.
#[derive(Debug)]
pub struct TagTable {
    entries: &'static [(&'static str, &'static [&'static str])],
}

impl TagTable {
    /// Wrap a static table.
    pub const fn new(entries: &'static [(&'static str, &'static [&'static str])]) -> Self {
        Self { entries }
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no labels.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Label names in table order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    /// Owned label names in table order.
    pub fn name_list(&self) -> Vec<String> {
        self.names().map(str::to_string).collect()
    }

    /// Keywords for a label.
    pub fn keywords(&self, label: &str) -> Option<&'static [&'static str]> {
        self.entries
            .iter()
            .find(|(name, _)| *name == label)
            .map(|(_, keywords)| *keywords)
    }

    /// First keyword of `keywords` found in `text`.
    ///
    /// `text` must already be lower-cased. Keywords are lower-cased before the
    /// comparison and scanned in order; the scan stops at the first hit.
    pub fn first_hit(keywords: &[&'static str], text: &str) -> Option<&'static str> {
        for &keyword in keywords {
            if text.contains(&keyword.to_lowercase()) {
                return Some(keyword);
            }
        }
        None
    }

    /// Every label with at least one keyword in `text`, in table order.
    pub fn matches(&self, text: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, keywords)| Self::first_hit(keywords, text).is_some())
            .map(|(name, _)| name.to_string())
            .collect()
    }
}

/// An ordered `strategy -> (label -> weight)` table.
#[derive(Debug)]
pub struct StrategyBook {
    strategies: &'static [(&'static str, &'static [(&'static str, f64)])],
}

impl StrategyBook {
    /// Wrap a static table.
    pub const fn new(strategies: &'static [(&'static str, &'static [(&'static str, f64)])]) -> Self {
        Self { strategies }
    }

    /// Number of strategies.
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Whether the book has no strategies.
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Strategy names in table order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.strategies.iter().map(|(name, _)| *name)
    }

    /// Owned strategy names in table order.
    pub fn name_list(&self) -> Vec<String> {
        self.names().map(str::to_string).collect()
    }

    /// Weight table for a strategy.
    pub fn weights(&self, strategy: &str) -> Option<&'static [(&'static str, f64)]> {
        self.strategies
            .iter()
            .find(|(name, _)| *name == strategy)
            .map(|(_, weights)| *weights)
    }

    /// Weight of `label` under `strategy`.
    pub fn weight(&self, strategy: &str, label: &str) -> Option<f64> {
        self.weights(strategy)?
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, w)| *w)
    }
}

const CONCEPT_ENTRIES: &[(&str, &[&str])] = &[
    // AI
    ("人工智能", &["AI", "人工智能", "机器学习", "深度学习", "神经网络", "大模型", "AIGC"]),
    ("AI芯片", &["GPU", "AI芯片", "算力芯片", "NPU", "TPU", "ASIC"]),
    ("大数据", &["大数据", "数据挖掘", "数据分析", "数据处理"]),
    ("云计算", &["云计算", "云服务", "云平台", "IaaS", "PaaS", "SaaS"]),
    // Semiconductor chain
    ("半导体", &["半导体", "芯片", "集成电路", "晶圆", "光刻"]),
    ("半导体设备", &["光刻机", "刻蚀机", "薄膜沉积", "检测设备"]),
    ("半导体材料", &["硅片", "光刻胶", "电子气体", "靶材"]),
    // New energy
    ("光伏", &["光伏", "太阳能", "组件", "逆变器", "硅料"]),
    ("锂电池", &["锂电池", "动力电池", "储能电池", "正极材料", "负极材料"]),
    ("新能源车", &["新能源车", "电动车", "电动汽车", "智能汽车"]),
    ("风电", &["风电", "风能", "风机", "叶片", "塔筒"]),
    // Finance
    ("银行", &["银行", "商业银行", "国有银行", "股份制银行"]),
    ("保险", &["保险", "寿险", "财险", "再保险"]),
    ("证券", &["证券", "券商", "投行", "经纪业务"]),
    // Consumer
    ("白酒", &["白酒", "高端白酒", "次高端白酒", "酱香型"]),
    ("医药", &["医药", "创新药", "生物制药", "医疗器械"]),
    ("消费电子", &["消费电子", "智能手机", "可穿戴设备", "TWS耳机"]),
    // Property and infrastructure
    ("房地产", &["房地产", "地产开发", "商业地产", "住宅地产"]),
    ("建筑建材", &["水泥", "玻璃", "钢材", "防水材料"]),
    ("工程机械", &["挖掘机", "起重机", "装载机", "混凝土机械"]),
    // Themes
    ("军工", &["军工", "航空航天", "导弹", "雷达", "军舰"]),
    ("数字经济", &["数字经济", "数字产业化", "产业数字化"]),
    ("专精特新", &["专精特新", "小巨人", "单项冠军"]),
    ("国企改革", &["国企改革", "央企", "混改", "资产重组"]),
    ("一带一路", &["一带一路", "海外工程", "基础设施"]),
    ("碳中和", &["碳中和", "碳达峰", "绿色能源", "环保"]),
    ("元宇宙", &["元宇宙", "VR", "AR", "虚拟现实", "数字孪生"]),
    ("Web3", &["Web3", "区块链", "去中心化", "NFT", "DAO"]),
    ("6G", &["6G", "通信技术", "卫星互联网", "太赫兹"]),
    ("量子计算", &["量子计算", "量子通信", "量子加密"]),
    ("脑机接口", &["脑机接口", "神经科技", "BCI"]),
    ("合成生物", &["合成生物", "基因编辑", "CRISPR"]),
];

/// Concept tags.
pub static CONCEPT_TAGS: TagTable = TagTable::new(CONCEPT_ENTRIES);

const INDUSTRY_ENTRIES: &[(&str, &[&str])] = &[
    ("计算机", &["软件", "IT服务", "系统集成", "信息安全"]),
    ("电子", &["半导体", "光学光电子", "消费电子", "元件"]),
    ("通信", &["通信设备", "通信服务", "运营商"]),
    ("电力设备", &["电网设备", "电源设备", "电机"]),
    ("汽车", &["乘用车", "商用车", "汽车零部件"]),
    ("有色金属", &["铜", "铝", "锂", "钴", "稀土"]),
    ("钢铁", &["普钢", "特钢", "不锈钢"]),
    ("化工", &["化学制品", "化学原料", "化肥", "农药"]),
    ("医药生物", &["化学制药", "生物制品", "医疗服务", "医疗器械"]),
    ("食品饮料", &["白酒", "啤酒", "软饮料", "调味品", "乳制品"]),
    ("家用电器", &["白色家电", "黑色家电", "小家电"]),
    ("轻工制造", &["造纸", "包装印刷", "家具", "文娱用品"]),
    ("纺织服饰", &["服装", "家纺", "鞋帽", "珠宝"]),
    ("农林牧渔", &["种植业", "畜牧业", "渔业", "饲料"]),
    ("商贸零售", &["百货", "超市", "专业连锁", "电商"]),
    ("交通运输", &["航空", "机场", "公路", "铁路", "港口", "物流"]),
    ("房地产", &["住宅开发", "商业地产", "园区开发"]),
    ("建筑装饰", &["房屋建设", "装修装饰", "基础建设"]),
    ("银行", &["国有银行", "股份制银行", "城商行", "农商行"]),
    ("非银金融", &["证券", "保险", "信托", "期货"]),
];

/// Industry tags.
pub static INDUSTRY_TAGS: TagTable = TagTable::new(INDUSTRY_ENTRIES);

/// Strategy weight tables.
///
/// Some labels (公用事业, 煤炭, 黄金, ...) are not produced by the built-in tag
/// tables; they only score when a caller supplies matching labels.
pub static STRATEGY_BOOK: StrategyBook = StrategyBook::new(STRATEGY_ENTRIES);

const STRATEGY_ENTRIES: &[(&str, &[(&str, f64)])] = &[
    // Momentum: change > 7%
    (
        "强势动量",
        &[
            ("人工智能", 0.85),
            ("AI芯片", 0.90),
            ("半导体", 0.80),
            ("新能源车", 0.75),
            ("光伏", 0.70),
            ("锂电池", 0.75),
            ("军工", 0.80),
            ("6G", 0.85),
            ("元宇宙", 0.70),
            ("Web3", 0.65),
        ],
    ),
    (
        "反转动量",
        &[
            ("银行", 0.85),
            ("保险", 0.80),
            ("白酒", 0.75),
            ("医药", 0.70),
            ("公用事业", 0.80),
            ("高速公路", 0.75),
            ("煤炭", 0.70),
            ("石油石化", 0.65),
        ],
    ),
    (
        "突破动量",
        &[
            ("半导体设备", 0.90),
            ("AI芯片", 0.85),
            ("6G", 0.85),
            ("量子计算", 0.90),
            ("脑机接口", 0.85),
            ("合成生物", 0.80),
            ("军工", 0.75),
            ("新能源车", 0.70),
        ],
    ),
    // Value: PE < 15
    (
        "深度价值",
        &[
            ("银行", 0.90),
            ("保险", 0.85),
            ("煤炭", 0.80),
            ("钢铁", 0.75),
            ("建材", 0.70),
            ("电力", 0.75),
            ("高速公路", 0.80),
            ("港口", 0.70),
        ],
    ),
    // Value: PE 15-30
    (
        "合理价值",
        &[
            ("食品饮料", 0.80),
            ("家用电器", 0.75),
            ("医药生物", 0.70),
            ("汽车", 0.65),
            ("电子", 0.60),
            ("计算机", 0.55),
            ("通信", 0.60),
            ("电力设备", 0.65),
        ],
    ),
    // Value: ROE > 15%
    (
        "质量价值",
        &[
            ("白酒", 0.90),
            ("食品饮料", 0.85),
            ("家用电器", 0.80),
            ("医药生物", 0.75),
            ("电子", 0.70),
            ("计算机", 0.65),
            ("银行", 0.60),
            ("非银金融", 0.55),
        ],
    ),
    // Defensive: decline < 1%
    (
        "抗跌防御",
        &[
            ("银行", 0.85),
            ("公用事业", 0.80),
            ("医药", 0.75),
            ("食品饮料", 0.70),
            ("高速公路", 0.80),
            ("煤炭", 0.75),
            ("石油石化", 0.70),
            ("黄金", 0.85),
        ],
    ),
    (
        "稳健防御",
        &[
            ("银行", 0.80),
            ("保险", 0.75),
            ("公用事业", 0.75),
            ("医药", 0.70),
            ("食品饮料", 0.65),
            ("必需消费品", 0.70),
            ("电信", 0.65),
            ("房地产", 0.60),
        ],
    ),
    (
        "红利防御",
        &[
            ("银行", 0.90),
            ("煤炭", 0.85),
            ("石油石化", 0.80),
            ("电力", 0.75),
            ("高速公路", 0.80),
            ("港口", 0.75),
            ("钢铁", 0.70),
            ("建材", 0.65),
        ],
    ),
    // US market mapping
    (
        "军工映射",
        &[
            ("军工", 0.95),
            ("航空航天", 0.90),
            ("半导体", 0.75),
            ("通信", 0.70),
            ("新材料", 0.65),
            ("高端制造", 0.60),
        ],
    ),
    (
        "AI芯片映射",
        &[
            ("AI芯片", 0.95),
            ("半导体", 0.90),
            ("半导体设备", 0.85),
            ("半导体材料", 0.80),
            ("人工智能", 0.75),
            ("云计算", 0.70),
            ("大数据", 0.65),
        ],
    ),
    (
        "新能源映射",
        &[
            ("光伏", 0.90),
            ("锂电池", 0.85),
            ("新能源车", 0.80),
            ("风电", 0.75),
            ("氢能", 0.70),
            ("储能", 0.65),
            ("电网设备", 0.60),
        ],
    ),
    (
        "消费电子映射",
        &[
            ("消费电子", 0.90),
            ("半导体", 0.75),
            ("光学光电子", 0.70),
            ("元器件", 0.65),
            ("5G", 0.60),
            ("物联网", 0.55),
        ],
    ),
    (
        "生物医药映射",
        &[
            ("医药", 0.90),
            ("创新药", 0.85),
            ("生物制药", 0.80),
            ("医疗器械", 0.75),
            ("医疗服务", 0.70),
            ("基因治疗", 0.65),
            ("合成生物", 0.60),
        ],
    ),
];
