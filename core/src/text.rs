//! Localized free-text generation behind the [`TextFactory`] capability.
//!
//! The catalog builder and the order synthesizer only ever see the trait,
//! so a different backend (another locale, a fixture list in tests) can be
//! swapped in without touching generation logic. The default backend,
//! [`CuratedTextFactory`], draws from curated zh-CN word lists and builds
//! UUID v4 tokens from the caller's stream, so the same seed yields the same
//! text.

use crate::rng::StreamRng;

/// A consignee location. `city` always belongs to `province`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Place {
    pub province: String,
    pub city: String,
}

/// Source of names, places, product text and unique tokens.
pub trait TextFactory {
    /// Full person name of a consignee.
    fn person_name(&self, rng: &mut StreamRng) -> String;

    /// Province plus a city inside it.
    fn place(&self, rng: &mut StreamRng) -> Place;

    /// Short marketing phrase used as a product name.
    fn product_phrase(&self, rng: &mut StreamRng) -> String;

    /// Color name used for color/spec attributes.
    fn color_name(&self, rng: &mut StreamRng) -> String;

    /// Lowercase hyphenated UUID-shaped token (36 chars). Callers truncate
    /// and upper-case as their identifier format requires.
    fn token(&self, rng: &mut StreamRng) -> String;
}

/// Take the first `len` chars of a fresh token, optionally upper-cased.
pub fn short_token(
    text: &dyn TextFactory,
    rng: &mut StreamRng,
    len: usize,
    upper: bool,
) -> String {
    let token: String = text.token(rng).chars().take(len).collect();
    if upper {
        token.to_uppercase()
    } else {
        token
    }
}

/// Deterministic zh-CN generator using curated lists.
#[derive(Debug, Default, Clone, Copy)]
pub struct CuratedTextFactory;

impl CuratedTextFactory {
    fn surnames() -> &'static [&'static str] {
        &[
            "王", "李", "张", "刘", "陈", "杨", "黄", "赵", "吴", "周", "徐", "孙", "马", "朱",
            "胡", "郭", "何", "高", "林", "罗", "郑", "梁", "谢", "宋", "唐", "许", "韩", "冯",
            "邓", "曹", "彭", "曾", "肖", "田", "董", "袁", "潘", "于", "蒋", "蔡", "余", "杜",
            "叶", "程", "苏", "魏", "吕", "丁", "任", "沈", "姚", "卢", "姜", "崔", "钟", "谭",
            "陆", "汪", "范", "金", "石", "廖", "贾", "夏", "韦", "付", "方", "白", "邹", "孟",
            "熊", "秦", "邱", "江", "尹", "薛", "闫", "段", "雷", "侯", "龙", "史", "欧阳",
        ]
    }

    fn given_names() -> &'static [&'static str] {
        &[
            "伟", "芳", "娜", "秀英", "敏", "静", "丽", "强", "磊", "军", "洋", "勇", "艳",
            "杰", "娟", "涛", "明", "超", "秀兰", "霞", "平", "刚", "桂英", "建华", "文",
            "华", "红", "玉兰", "建国", "志强", "丹", "萍", "鹏", "辉", "玲", "桂兰", "浩",
            "宇", "欣", "婷", "雪", "琳", "晨", "佳", "子涵", "梓萱", "一诺", "思远", "雨桐",
            "俊杰", "嘉怡", "晓东", "海燕", "春梅", "国强", "淑珍", "丽娟", "建军", "凤英",
            "欢", "瑶", "倩", "博", "帆", "旭", "凯", "阳", "琴", "莉", "斌", "飞", "颖",
        ]
    }

    /// Every province-level division with a handful of its cities.
    fn provinces() -> &'static [(&'static str, &'static [&'static str])] {
        &[
            ("北京市", &["北京市"]),
            ("天津市", &["天津市"]),
            ("上海市", &["上海市"]),
            ("重庆市", &["重庆市"]),
            ("河北省", &["石家庄市", "唐山市", "保定市", "邯郸市", "廊坊市"]),
            ("山西省", &["太原市", "大同市", "运城市", "长治市"]),
            ("内蒙古自治区", &["呼和浩特市", "包头市", "鄂尔多斯市", "赤峰市"]),
            ("辽宁省", &["沈阳市", "大连市", "鞍山市", "锦州市"]),
            ("吉林省", &["长春市", "吉林市", "四平市", "延吉市"]),
            ("黑龙江省", &["哈尔滨市", "齐齐哈尔市", "大庆市", "牡丹江市"]),
            ("江苏省", &["南京市", "苏州市", "无锡市", "常州市", "南通市", "徐州市"]),
            ("浙江省", &["杭州市", "宁波市", "温州市", "绍兴市", "嘉兴市", "金华市"]),
            ("安徽省", &["合肥市", "芜湖市", "蚌埠市", "安庆市"]),
            ("福建省", &["福州市", "厦门市", "泉州市", "漳州市"]),
            ("江西省", &["南昌市", "赣州市", "九江市", "上饶市"]),
            ("山东省", &["济南市", "青岛市", "烟台市", "潍坊市", "临沂市"]),
            ("河南省", &["郑州市", "洛阳市", "开封市", "南阳市", "新乡市"]),
            ("湖北省", &["武汉市", "宜昌市", "襄阳市", "荆州市"]),
            ("湖南省", &["长沙市", "株洲市", "湘潭市", "岳阳市", "衡阳市"]),
            ("广东省", &["广州市", "深圳市", "东莞市", "佛山市", "珠海市", "汕头市"]),
            ("广西壮族自治区", &["南宁市", "柳州市", "桂林市", "北海市"]),
            ("海南省", &["海口市", "三亚市", "儋州市"]),
            ("四川省", &["成都市", "绵阳市", "德阳市", "宜宾市", "南充市"]),
            ("贵州省", &["贵阳市", "遵义市", "六盘水市", "安顺市"]),
            ("云南省", &["昆明市", "大理市", "丽江市", "曲靖市"]),
            ("西藏自治区", &["拉萨市", "日喀则市", "林芝市"]),
            ("陕西省", &["西安市", "宝鸡市", "咸阳市", "延安市"]),
            ("甘肃省", &["兰州市", "天水市", "酒泉市", "张掖市"]),
            ("青海省", &["西宁市", "海东市", "格尔木市"]),
            ("宁夏回族自治区", &["银川市", "石嘴山市", "吴忠市"]),
            ("新疆维吾尔自治区", &["乌鲁木齐市", "克拉玛依市", "喀什市", "伊宁市"]),
            ("台湾省", &["台北市", "高雄市", "台中市"]),
            ("香港特别行政区", &["香港"]),
            ("澳门特别行政区", &["澳门"]),
        ]
    }

    fn phrase_styles() -> &'static [&'static str] {
        &[
            "轻奢", "经典", "简约", "复古", "时尚", "百搭", "休闲", "通勤", "法式", "韩版",
            "宽松", "修身", "高腰", "甜美", "优雅", "原创", "新款", "小众",
        ]
    }

    fn phrase_materials() -> &'static [&'static str] {
        &[
            "纯棉", "真丝", "羊毛", "雪纺", "牛仔", "亚麻", "针织", "蕾丝", "皮质", "灯芯绒",
            "醋酸", "天丝",
        ]
    }

    fn phrase_items() -> &'static [&'static str] {
        &[
            "连衣裙", "衬衫", "T恤", "半身裙", "阔腿裤", "风衣", "西装外套", "针织开衫",
            "卫衣", "羽绒服", "大衣", "吊带背心", "打底衫", "直筒裤", "短外套", "马甲",
        ]
    }

    fn colors() -> &'static [&'static str] {
        &[
            "黑色", "白色", "红色", "酒红色", "粉红色", "橙色", "黄色", "米黄色", "绿色",
            "墨绿色", "青色", "蓝色", "天蓝色", "藏青色", "紫色", "紫罗兰色", "灰色",
            "银色", "金色", "卡其色", "驼色", "杏色", "咖啡色", "象牙白",
        ]
    }
}

impl TextFactory for CuratedTextFactory {
    fn person_name(&self, rng: &mut StreamRng) -> String {
        let surname = rng.pick(Self::surnames());
        let given = rng.pick(Self::given_names());
        format!("{surname}{given}")
    }

    fn place(&self, rng: &mut StreamRng) -> Place {
        let &(province, cities) = rng.pick(Self::provinces());
        let city = rng.pick(cities);
        Place {
            province: province.to_string(),
            city: city.to_string(),
        }
    }

    fn product_phrase(&self, rng: &mut StreamRng) -> String {
        let style = rng.pick(Self::phrase_styles());
        let material = rng.pick(Self::phrase_materials());
        let item = rng.pick(Self::phrase_items());
        format!("{style}{material}{item}")
    }

    fn color_name(&self, rng: &mut StreamRng) -> String {
        rng.pick(Self::colors()).to_string()
    }

    fn token(&self, rng: &mut StreamRng) -> String {
        let mut bytes = [0u8; 16];
        rng.fill_bytes(&mut bytes);
        uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .hyphenated()
            .to_string()
    }
}
