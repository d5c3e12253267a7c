//! 默认风格语料
//!
//! 语料目录中没有任何 *.txt 文件时写入的样本。

pub const DEFAULT_CORPUS_FILE_NAME: &str = "eileen_chang_excerpts.txt";

pub const DEFAULT_EXCERPTS: &str = r#"胡琴咿咿哑哑拉着，在万盏灯的夜晚，拉过来又拉过去，说不尽的苍凉的故事——不问也罢！

风从窗子里进来，对面挂着的回文雕漆长镜被吹得摇摇晃晃，磕托磕托敲着墙。七巧双手按住了镜子。镜子里反映着的翠竹帘子和一副金绿山水屏条依旧在风中来回荡漾着，望久了，便有一种晕船的感觉。再定睛看时，翠竹帘子已经褪了色，金绿山水换了一张她丈夫的遗像，镜子里的人也老了十年。

那是个潮湿的下午，像一团拧不干的湿布。

她穿着一件苹果绿软缎旗袍，那绿色绿得流油，像是一只刚切开的青苹果。

三十年前的月亮早已沉了下去，三十年前的人也死了，然而三十年前的故事还没完——完不了。

年轻的人想着三十年前的月亮该是铜钱大的一个红黄的湿晕，像朵云轩信笺上落了一滴泪珠，陈旧而迷糊。老年人回忆中的三十年前的月亮是欢愉的，比眼前的月亮大、圆、白；然而隔着三十年的辛苦路望回看，再好的月色也不免带点凄凉。

她那平扁而尖利的喉咙四面割着人像剃刀片。

生在这世上，没有一样感情不是千疮百孔的。

也许每一个男子全都有过这样的两个女人，至少两个。娶了红玫瑰，久而久之，红的变了墙上的一抹蚊子血，白的还是"床前明月光"；娶了白玫瑰，白的便是衣服上沾的一粒饭黏子，红的却是心口上一颗朱砂痣。

对于三十岁以后的人来说，十年八年不过是指缝间的事，而对于年轻人而言，三年五年就可以是一生一世。

我要你知道，在这个世界上总有一个人是等着你的，不管在什么时候，不管在什么地方，反正你知道，总有这么个人。

于千万人之中遇见你所要遇见的人，于千万年之中，时间的无涯的荒野里，没有早一步，也没有晚一步，刚巧赶上了，那也没有别的话可说，惟有轻轻地问一声："噢，你也在这里吗？"

她的眼睛像两只黑葡萄，又圆又亮，然而是死的。

他觉得她的手像一只小鸟，轻轻地停在他的手上。

月光像流水一般，静静地泻在这一片叶子和花上。薄薄的青雾浮起在荷塘里。叶子和花仿佛在牛乳中洗过一样；又像笼着轻纱的梦。

上海人是传统的中国人加上近代高压生活的磨练。新旧文化种种畸形产物的交流，结果也许是不甚健康的，但是这里有一种奇异的智慧。

笑，全世界便与你同声笑，哭，你便独自哭。

因为懂得，所以慈悲。

长的是磨难，短的是人生。

你如果认识从前的我，也许会原谅现在的我。

我以为爱情可以填满人生的遗憾。然而，制造更多遗憾的，却偏偏是爱情。

有一天我们的文明，不论是升华还是浮华，都要成为过去。然而现在还是清如水明如镜的秋天，我应当是快乐的。"#;
